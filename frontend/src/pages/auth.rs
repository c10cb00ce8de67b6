use shared::{Credentials, SessionInfo};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Clone, Copy, PartialEq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Properties, PartialEq)]
pub struct AuthPageProps {
    pub mode: AuthMode,
    /// Emitted with the issued session after a successful login/register
    pub on_authenticated: Callback<SessionInfo>,
    pub on_switch_mode: Callback<AuthMode>,
}

/// Email/password form shared by the login and register views.
#[function_component(AuthPage)]
pub fn auth_page(props: &AuthPageProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let on_email_input = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let mode = props.mode;
        let on_authenticated = props.on_authenticated.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let credentials = Credentials {
                email: (*email).clone(),
                password: (*password).clone(),
            };
            let submitting = submitting.clone();
            let error = error.clone();
            let on_authenticated = on_authenticated.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let api = ApiClient::new();
                let result = match mode {
                    AuthMode::Login => api.login(&credentials).await,
                    AuthMode::Register => api.register(&credentials).await,
                };
                match result {
                    Ok(session) => on_authenticated.emit(session),
                    Err(message) => error.set(Some(message)),
                }
                submitting.set(false);
            });
        })
    };

    let (title, submit_label, switch_text, switch_label, switch_to) = match props.mode {
        AuthMode::Login => (
            "Log in",
            "Log in",
            "No account yet?",
            "Register",
            AuthMode::Register,
        ),
        AuthMode::Register => (
            "Create account",
            "Register",
            "Already have an account?",
            "Log in",
            AuthMode::Login,
        ),
    };

    let on_switch = {
        let on_switch_mode = props.on_switch_mode.clone();
        Callback::from(move |_: MouseEvent| on_switch_mode.emit(switch_to))
    };

    html! {
        <div class="auth-page">
            <h2>{title}</h2>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            <form onsubmit={on_submit}>
                <div class="form-field">
                    <label>{"Email"}</label>
                    <input
                        type="email"
                        value={(*email).clone()}
                        oninput={on_email_input}
                        placeholder="you@example.com"
                    />
                </div>
                <div class="form-field">
                    <label>{"Password"}</label>
                    <input
                        type="password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                        placeholder="At least 8 characters"
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled={*submitting}>
                    {if *submitting { "Please wait..." } else { submit_label }}
                </button>
            </form>

            <p class="auth-switch">
                {switch_text}{" "}
                <button type="button" class="link-button" onclick={on_switch}>
                    {switch_label}
                </button>
            </p>
        </div>
    }
}
