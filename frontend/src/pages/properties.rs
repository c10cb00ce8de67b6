use shared::Property;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::booking_form::BookingForm;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct PropertiesPageProps {
    pub api: ApiClient,
    /// Whether a session is active; booking requires one
    pub logged_in: bool,
    /// Asks the shell to show the login view (booking attempted while logged out)
    pub on_require_login: Callback<()>,
    /// Asks the shell to switch to the bookings view after a booking succeeds
    pub on_booked: Callback<()>,
}

/// Public property listing with a per-property booking dialog.
#[function_component(PropertiesPage)]
pub fn properties_page(props: &PropertiesPageProps) -> Html {
    let properties = use_state(Vec::<Property>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let booking_target = use_state(|| Option::<Property>::None);

    {
        let properties = properties.clone();
        let loading = loading.clone();
        let error = error.clone();
        let api = props.api.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api.list_properties().await {
                    Ok(list) => properties.set(list),
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        });
    }

    let close_booking = {
        let booking_target = booking_target.clone();
        Callback::from(move |_: ()| booking_target.set(None))
    };

    let on_booked = {
        let booking_target = booking_target.clone();
        let on_booked = props.on_booked.clone();
        Callback::from(move |_: ()| {
            booking_target.set(None);
            on_booked.emit(());
        })
    };

    html! {
        <div class="properties-page">
            <h2>{"Properties"}</h2>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {if *loading {
                html! { <p class="loading">{"Loading properties..."}</p> }
            } else if properties.is_empty() {
                html! { <p class="empty">{"No properties listed yet."}</p> }
            } else {
                html! {
                    <div class="property-grid">
                        {for properties.iter().map(|property| {
                            let on_book = {
                                let booking_target = booking_target.clone();
                                let on_require_login = props.on_require_login.clone();
                                let logged_in = props.logged_in;
                                let property = property.clone();
                                Callback::from(move |_: MouseEvent| {
                                    if logged_in {
                                        booking_target.set(Some(property.clone()));
                                    } else {
                                        on_require_login.emit(());
                                    }
                                })
                            };

                            html! {
                                <div class="property-card" key={property.id.clone()}>
                                    {if let Some(url) = property.image_url.as_ref() {
                                        html! { <img class="property-image" src={url.clone()} alt={property.name.clone()} /> }
                                    } else { html! {} }}
                                    <h3>{&property.name}</h3>
                                    <p class="property-location">{&property.location}</p>
                                    <p class="property-description">{&property.description}</p>
                                    <p class="property-price">{format!("${:.2} / night", property.price_per_night)}</p>
                                    {if property.availability {
                                        html! {
                                            <button class="btn btn-primary" onclick={on_book}>
                                                {"Book"}
                                            </button>
                                        }
                                    } else {
                                        html! { <span class="unavailable">{"Unavailable"}</span> }
                                    }}
                                </div>
                            }
                        })}
                    </div>
                }
            }}

            {if let Some(property) = (*booking_target).as_ref() {
                html! {
                    <div class="modal-backdrop">
                        <div class="modal">
                            <BookingForm
                                property={property.clone()}
                                api={props.api.clone()}
                                on_booked={on_booked}
                                on_cancel={close_booking}
                            />
                        </div>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
