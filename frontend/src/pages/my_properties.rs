use shared::{Property, PropertyInput};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct MyPropertiesPageProps {
    pub api: ApiClient,
}

/// Listing management for the current owner: their properties plus a
/// form for creating or editing one.
#[function_component(MyPropertiesPage)]
pub fn my_properties_page(props: &MyPropertiesPageProps) -> Html {
    let properties = use_state(Vec::<Property>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);
    let reload = use_state(|| 0u32);

    // None = form hidden, Some(None) = creating, Some(Some(id)) = editing
    let editing = use_state(|| Option::<Option<String>>::None);
    let name = use_state(String::new);
    let description = use_state(String::new);
    let location = use_state(String::new);
    let price = use_state(String::new);
    let image_url = use_state(String::new);
    let availability = use_state(|| true);
    let submitting = use_state(|| false);

    {
        let properties = properties.clone();
        let loading = loading.clone();
        let error = error.clone();
        let api = props.api.clone();
        use_effect_with(*reload, move |_| {
            spawn_local(async move {
                match api.my_properties().await {
                    Ok(list) => properties.set(list),
                    Err(message) => error.set(Some(message)),
                }
                loading.set(false);
            });
        });
    }

    let open_create = {
        let editing = editing.clone();
        let name = name.clone();
        let description = description.clone();
        let location = location.clone();
        let price = price.clone();
        let image_url = image_url.clone();
        let availability = availability.clone();
        Callback::from(move |_: MouseEvent| {
            name.set(String::new());
            description.set(String::new());
            location.set(String::new());
            price.set(String::new());
            image_url.set(String::new());
            availability.set(true);
            editing.set(Some(None));
        })
    };

    let open_edit = {
        let editing = editing.clone();
        let name = name.clone();
        let description = description.clone();
        let location = location.clone();
        let price = price.clone();
        let image_url = image_url.clone();
        let availability = availability.clone();
        Callback::from(move |property: Property| {
            name.set(property.name);
            description.set(property.description);
            location.set(property.location);
            price.set(property.price_per_night.to_string());
            image_url.set(property.image_url.unwrap_or_default());
            availability.set(property.availability);
            editing.set(Some(Some(property.id)));
        })
    };

    let close_form = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    let on_submit = {
        let editing = editing.clone();
        let name = name.clone();
        let description = description.clone();
        let location = location.clone();
        let price = price.clone();
        let image_url = image_url.clone();
        let availability = availability.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let reload = reload.clone();
        let api = props.api.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Ok(price_per_night) = price.parse::<f64>() else {
                error.set(Some("Enter a valid nightly price".to_string()));
                return;
            };
            let input = PropertyInput {
                name: (*name).clone(),
                description: (*description).clone(),
                location: (*location).clone(),
                price_per_night,
                availability: *availability,
                image_url: (!image_url.is_empty()).then(|| (*image_url).clone()),
            };

            let editing = editing.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let reload = reload.clone();
            let api = api.clone();
            let target = (*editing).clone();

            spawn_local(async move {
                submitting.set(true);
                error.set(None);

                let result = match target {
                    Some(Some(id)) => api.update_property(&id, &input).await.map(|_| ()),
                    _ => api.create_property(&input).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        editing.set(None);
                        reload.set(*reload + 1);
                    }
                    Err(message) => error.set(Some(message)),
                }
                submitting.set(false);
            });
        })
    };

    let delete_property = {
        let api = props.api.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let api = api.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api.delete_property(&id).await {
                    Ok(_) => reload.set(*reload + 1),
                    Err(message) => error.set(Some(message)),
                }
            });
        })
    };

    let text_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    html! {
        <div class="my-properties-page">
            <div class="page-header">
                <h2>{"My properties"}</h2>
                <button class="btn btn-primary" onclick={open_create}>{"List a property"}</button>
            </div>

            {if let Some(message) = (*error).as_ref() {
                html! { <div class="form-message error">{message}</div> }
            } else { html! {} }}

            {if editing.is_some() {
                let heading = match &*editing {
                    Some(Some(_)) => "Edit property",
                    _ => "New property",
                };
                html! {
                    <form class="property-form" onsubmit={on_submit}>
                        <h3>{heading}</h3>
                        <div class="form-field">
                            <label>{"Name"}</label>
                            <input value={(*name).clone()} oninput={text_input(&name)} />
                        </div>
                        <div class="form-field">
                            <label>{"Description"}</label>
                            <input value={(*description).clone()} oninput={text_input(&description)} />
                        </div>
                        <div class="form-field">
                            <label>{"Location"}</label>
                            <input value={(*location).clone()} oninput={text_input(&location)} />
                        </div>
                        <div class="form-field">
                            <label>{"Price per night"}</label>
                            <input type="number" step="0.01" min="0"
                                value={(*price).clone()} oninput={text_input(&price)} />
                        </div>
                        <div class="form-field">
                            <label>{"Image URL (optional)"}</label>
                            <input value={(*image_url).clone()} oninput={text_input(&image_url)} />
                        </div>
                        <div class="form-field checkbox">
                            <label>
                                <input type="checkbox" checked={*availability} onchange={
                                    let availability = availability.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        availability.set(input.checked());
                                    })
                                } />
                                {"Open for booking"}
                            </label>
                        </div>
                        <div class="form-actions">
                            <button type="submit" class="btn btn-primary" disabled={*submitting}>
                                {if *submitting { "Saving..." } else { "Save" }}
                            </button>
                            <button type="button" class="btn" onclick={close_form}>{"Cancel"}</button>
                        </div>
                    </form>
                }
            } else { html! {} }}

            {if *loading {
                html! { <p class="loading">{"Loading..."}</p> }
            } else if properties.is_empty() {
                html! { <p class="empty">{"You have not listed any properties."}</p> }
            } else {
                html! {
                    <div class="property-grid">
                        {for properties.iter().map(|property| {
                            let on_edit = {
                                let open_edit = open_edit.clone();
                                let property = property.clone();
                                Callback::from(move |_: MouseEvent| open_edit.emit(property.clone()))
                            };
                            let on_delete = {
                                let delete_property = delete_property.clone();
                                let id = property.id.clone();
                                Callback::from(move |_: MouseEvent| delete_property.emit(id.clone()))
                            };

                            html! {
                                <div class="property-card" key={property.id.clone()}>
                                    <h3>{&property.name}</h3>
                                    <p class="property-location">{&property.location}</p>
                                    <p class="property-price">{format!("${:.2} / night", property.price_per_night)}</p>
                                    {if !property.availability {
                                        html! { <span class="unavailable">{"Unavailable"}</span> }
                                    } else { html! {} }}
                                    <div class="card-actions">
                                        <button class="btn" onclick={on_edit}>{"Edit"}</button>
                                        <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
                                    </div>
                                </div>
                            }
                        })}
                    </div>
                }
            }}
        </div>
    }
}
