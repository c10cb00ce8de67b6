use shared::SessionInfo;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod pages;
mod services;

use pages::auth::{AuthMode, AuthPage};
use pages::bookings::BookingsPage;
use pages::my_properties::MyPropertiesPage;
use pages::properties::PropertiesPage;
use services::api::ApiClient;
use services::session;

#[derive(Clone, Copy, PartialEq)]
enum View {
    Properties,
    Bookings,
    MyProperties,
    Login,
    Register,
}

#[function_component(App)]
fn app() -> Html {
    let session = use_state(session::load);
    let view = use_state(|| View::Properties);

    let api = ApiClient::with_token(session.as_ref().map(|s| s.token.clone()));
    let logged_in = session.is_some();

    let switch_view = {
        let view = view.clone();
        move |target: View| {
            let view = view.clone();
            Callback::from(move |_: MouseEvent| view.set(target))
        }
    };

    let on_authenticated = {
        let session = session.clone();
        let view = view.clone();
        Callback::from(move |info: SessionInfo| {
            session::save(&info);
            session.set(Some(info));
            view.set(View::Properties);
        })
    };

    let on_switch_mode = {
        let view = view.clone();
        Callback::from(move |mode: AuthMode| {
            view.set(match mode {
                AuthMode::Login => View::Login,
                AuthMode::Register => View::Register,
            });
        })
    };

    let on_logout = {
        let session = session.clone();
        let view = view.clone();
        let api = api.clone();
        Callback::from(move |_: MouseEvent| {
            let session = session.clone();
            let view = view.clone();
            let api = api.clone();
            spawn_local(async move {
                // the server-side session is best-effort; the local one always goes
                if let Err(e) = api.logout().await {
                    gloo::console::error!("Logout request failed:", e);
                }
                session::clear();
                session.set(None);
                view.set(View::Properties);
            });
        })
    };

    let on_require_login = {
        let view = view.clone();
        Callback::from(move |_: ()| view.set(View::Login))
    };

    let on_booked = {
        let view = view.clone();
        Callback::from(move |_: ()| view.set(View::Bookings))
    };

    html! {
        <div class="app">
            <header class="app-header">
                <h1 class="app-title">{"Staybook"}</h1>
                <nav class="app-nav">
                    <button class="nav-link" onclick={switch_view(View::Properties)}>
                        {"Properties"}
                    </button>
                    {if logged_in {
                        html! {
                            <>
                                <button class="nav-link" onclick={switch_view(View::Bookings)}>
                                    {"My bookings"}
                                </button>
                                <button class="nav-link" onclick={switch_view(View::MyProperties)}>
                                    {"My properties"}
                                </button>
                                <button class="nav-link" onclick={on_logout}>
                                    {"Log out"}
                                </button>
                            </>
                        }
                    } else {
                        html! {
                            <button class="nav-link" onclick={switch_view(View::Login)}>
                                {"Log in"}
                            </button>
                        }
                    }}
                </nav>
            </header>

            <main class="app-main">
                {match *view {
                    View::Properties => html! {
                        <PropertiesPage
                            api={api.clone()}
                            logged_in={logged_in}
                            on_require_login={on_require_login}
                            on_booked={on_booked}
                        />
                    },
                    View::Bookings if logged_in => html! {
                        <BookingsPage api={api.clone()} />
                    },
                    View::MyProperties if logged_in => html! {
                        <MyPropertiesPage api={api.clone()} />
                    },
                    View::Login | View::Bookings | View::MyProperties => html! {
                        <AuthPage
                            mode={AuthMode::Login}
                            on_authenticated={on_authenticated.clone()}
                            on_switch_mode={on_switch_mode.clone()}
                        />
                    },
                    View::Register => html! {
                        <AuthPage
                            mode={AuthMode::Register}
                            on_authenticated={on_authenticated.clone()}
                            on_switch_mode={on_switch_mode.clone()}
                        />
                    },
                }}
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
