use chrono::{Datelike, NaiveDate};
use shared::calendar::{self, CalendarCell};
use shared::policy;
use wasm_bindgen::JsCast;
use web_sys::{window, Element};
use yew::prelude::*;

use crate::services::date_utils::{format_date_for_display, month_name, today};

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    pub label: String,
    /// Selected date, if any
    pub selected: Option<NaiveDate>,
    /// Earliest selectable date; everything before it renders disabled
    pub min_date: NaiveDate,
    /// Callback when a selectable day is picked
    pub on_change: Callback<NaiveDate>,
}

#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let show_calendar = use_state(|| false);
    let container_ref = use_node_ref();

    // The view month starts where the selection (or the minimum) is
    let initial = props.selected.unwrap_or(props.min_date);
    let view_year = use_state(|| initial.year());
    let view_month = use_state(|| initial.month());

    let toggle_calendar = {
        let show_calendar = show_calendar.clone();
        Callback::from(move |_: MouseEvent| {
            show_calendar.set(!*show_calendar);
        })
    };

    // Close when clicking outside the widget
    {
        let show_calendar = show_calendar.clone();
        let container_ref = container_ref.clone();
        use_effect_with(*show_calendar, move |is_open| {
            let listener = is_open.then(|| {
                let show_calendar = show_calendar.clone();
                let container_ref = container_ref.clone();
                gloo::events::EventListener::new(&window().unwrap(), "mousedown", move |e| {
                    if let Some(target) = e.target() {
                        if let Ok(element) = target.dyn_into::<Element>() {
                            if let Some(container) = container_ref.cast::<Element>() {
                                if !container.contains(Some(&element)) {
                                    show_calendar.set(false);
                                }
                            }
                        }
                    }
                })
            });
            move || drop(listener)
        });
    }

    let prev_month = {
        let view_year = view_year.clone();
        let view_month = view_month.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = calendar::prev_month(*view_year, *view_month);
            view_year.set(year);
            view_month.set(month);
        })
    };

    let next_month = {
        let view_year = view_year.clone();
        let view_month = view_month.clone();
        Callback::from(move |_: MouseEvent| {
            let (year, month) = calendar::next_month(*view_year, *view_month);
            view_year.set(year);
            view_month.set(month);
        })
    };

    let grid = calendar::month_grid(*view_year, *view_month);
    let can_go_prev = policy::can_go_prev(grid.year, grid.month, props.min_date);
    let today_date = today();

    let display_text = match props.selected {
        Some(date) => format_date_for_display(date),
        None => "Select date".to_string(),
    };

    html! {
        <div class="date-picker" ref={container_ref}>
            <label class="date-picker-label">{&props.label}</label>
            <button type="button" class="date-display-button" onclick={toggle_calendar}>
                <span class="date-text">{display_text}</span>
                <span class="calendar-icon">{"📅"}</span>
            </button>

            {if *show_calendar {
                html! {
                    <div class="calendar-dropdown">
                        <div class="calendar-header">
                            <button type="button" class="nav-button"
                                onclick={prev_month} disabled={!can_go_prev}>{"‹"}</button>
                            <span class="month-year">
                                {format!("{} {}", month_name(grid.month), grid.year)}
                            </span>
                            <button type="button" class="nav-button" onclick={next_month}>{"›"}</button>
                        </div>

                        <div class="calendar-grid">
                            <div class="weekday-header">
                                <span>{"Mon"}</span>
                                <span>{"Tue"}</span>
                                <span>{"Wed"}</span>
                                <span>{"Thu"}</span>
                                <span>{"Fri"}</span>
                                <span>{"Sat"}</span>
                                <span>{"Sun"}</span>
                            </div>

                            <div class="calendar-days">
                                {for grid.cells.iter().map(|cell| match cell {
                                    CalendarCell::Blank => html! {
                                        <div class="calendar-day empty"></div>
                                    },
                                    CalendarCell::Day(day) => {
                                        let date = grid.date_of(*day);
                                        let selectable = policy::is_selectable(date, props.min_date);
                                        let is_selected = props.selected == Some(date);
                                        let is_today = date == today_date;

                                        let on_click = {
                                            let on_change = props.on_change.clone();
                                            let show_calendar = show_calendar.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                // disabled days never get here, but stay a no-op anyway
                                                if !selectable {
                                                    return;
                                                }
                                                on_change.emit(date);
                                                show_calendar.set(false);
                                            })
                                        };

                                        html! {
                                            <button
                                                type="button"
                                                class={classes!(
                                                    "calendar-day",
                                                    selectable.then_some("valid"),
                                                    (!selectable).then_some("invalid"),
                                                    is_selected.then_some("selected"),
                                                    is_today.then_some("today"),
                                                )}
                                                disabled={!selectable}
                                                onclick={on_click}
                                            >
                                                {*day}
                                            </button>
                                        }
                                    }
                                })}
                            </div>
                        </div>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}
