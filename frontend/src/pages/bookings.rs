use shared::BookingWithProperty;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::format_date_for_display;

#[derive(Properties, PartialEq)]
pub struct BookingsPageProps {
    pub api: ApiClient,
}

/// The current user's bookings, newest first, each with its property
/// embedded and a cancel button.
#[function_component(BookingsPage)]
pub fn bookings_page(props: &BookingsPageProps) -> Html {
    let bookings = use_state(Vec::<BookingWithProperty>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let reload = use_state(|| 0u32);

    {
        let bookings = bookings.clone();
        let loading = loading.clone();
        let error = error.clone();
        let api = props.api.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match api.list_bookings().await {
                    Ok(list) => bookings.set(list),
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        });
    }

    let cancel_booking = {
        let api = props.api.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let api = api.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.delete_booking(&id).await {
                    Ok(_) => reload.set(*reload + 1),
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    html! {
        <div class="bookings-page">
            <h2>{"My bookings"}</h2>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {if *loading {
                html! { <p class="loading">{"Loading bookings..."}</p> }
            } else if bookings.is_empty() {
                html! { <p class="empty">{"You have no bookings yet."}</p> }
            } else {
                html! {
                    <div class="booking-list">
                        {for bookings.iter().map(|item| {
                            let on_cancel = {
                                let cancel_booking = cancel_booking.clone();
                                let id = item.booking.id.clone();
                                Callback::from(move |_: MouseEvent| cancel_booking.emit(id.clone()))
                            };

                            html! {
                                <div class="booking-card" key={item.booking.id.clone()}>
                                    <h3>{&item.property.name}</h3>
                                    <p class="property-location">{&item.property.location}</p>
                                    <p class="booking-dates">
                                        {format!(
                                            "{} – {}",
                                            format_date_for_display(item.booking.check_in_date),
                                            format_date_for_display(item.booking.check_out_date),
                                        )}
                                    </p>
                                    <p class="booking-total">
                                        {format!("Total: ${:.2}", item.booking.total_price)}
                                    </p>
                                    <button class="btn btn-danger" onclick={on_cancel}>
                                        {"Cancel booking"}
                                    </button>
                                </div>
                            }
                        })}
                    </div>
                }
            }}
        </div>
    }
}
