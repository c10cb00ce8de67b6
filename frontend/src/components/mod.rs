pub mod booking_form;
pub mod date_picker;
