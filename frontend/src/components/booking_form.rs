use shared::{policy, pricing, BookingInput, Property};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::date_picker::DatePicker;
use crate::services::api::ApiClient;
use crate::services::date_utils::today;

#[derive(Properties, PartialEq)]
pub struct BookingFormProps {
    pub property: Property,
    pub api: ApiClient,
    /// Emitted after the booking is accepted by the server
    pub on_booked: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Date-range selection and live price preview for one property.
///
/// The preview recomputes on every date change from the same pricing
/// functions the server uses, but only the dates are submitted; the
/// server's own computation is the price that gets persisted.
#[function_component(BookingForm)]
pub fn booking_form(props: &BookingFormProps) -> Html {
    let check_in = use_state(|| Option::<chrono::NaiveDate>::None);
    let check_out = use_state(|| Option::<chrono::NaiveDate>::None);
    let submitting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let today_date = today();

    let on_check_in_change = {
        let check_in = check_in.clone();
        let check_out = check_out.clone();
        Callback::from(move |date: chrono::NaiveDate| {
            // a check-out at or before the new check-in is cleared
            check_out.set(policy::apply_check_in(date, *check_out));
            check_in.set(Some(date));
        })
    };

    let on_check_out_change = {
        let check_out = check_out.clone();
        Callback::from(move |date: chrono::NaiveDate| {
            check_out.set(Some(date));
        })
    };

    let preview = match (*check_in, *check_out) {
        (Some(check_in), Some(check_out)) => {
            let (nights, total) = pricing::quote(check_in, check_out, props.property.price_per_night);
            Some((nights, total))
        }
        _ => None,
    };

    let on_submit = {
        let check_in = check_in.clone();
        let check_out = check_out.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let api = props.api.clone();
        let property_id = props.property.id.clone();
        let on_booked = props.on_booked.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(check_in), Some(check_out)) = (*check_in, *check_out) else {
                error.set(Some("Pick both a check-in and a check-out date".to_string()));
                return;
            };

            let submitting = submitting.clone();
            let error = error.clone();
            let api = api.clone();
            let property_id = property_id.clone();
            let on_booked = on_booked.clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let input = BookingInput {
                    check_in_date: check_in,
                    check_out_date: check_out,
                    property_id,
                };
                match api.create_booking(&input).await {
                    Ok(_) => on_booked.emit(()),
                    Err(message) => error.set(Some(message)),
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="booking-form">
            <h3>{format!("Book {}", props.property.name)}</h3>
            <p class="booking-rate">{format!("${:.2} per night", props.property.price_per_night)}</p>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            <form onsubmit={on_submit}>
                <DatePicker
                    label="Check-in"
                    selected={*check_in}
                    min_date={policy::check_in_min(today_date)}
                    on_change={on_check_in_change}
                />
                <DatePicker
                    label="Check-out"
                    selected={*check_out}
                    min_date={policy::check_out_min(*check_in, today_date)}
                    on_change={on_check_out_change}
                />

                {if let Some((nights, total)) = preview {
                    html! {
                        <div class="price-preview">
                            <span>{format!("{} night{}", nights, if nights == 1 { "" } else { "s" })}</span>
                            <span class="price-total">{format!("Total: ${:.2}", total)}</span>
                        </div>
                    }
                } else { html! {} }}

                <div class="booking-actions">
                    <button type="submit" class="btn btn-primary"
                        disabled={*submitting || preview.is_none()}>
                        {if *submitting { "Booking..." } else { "Book now" }}
                    </button>
                    <button type="button" class="btn" onclick={
                        let on_cancel = props.on_cancel.clone();
                        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
                    }>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}
