pub mod auth;
pub mod bookings;
pub mod my_properties;
pub mod properties;
