use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod policy;
pub mod pricing;

/// A property listed on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    /// Nightly rate, always positive
    pub price_per_night: f64,
    /// Whether the property is currently open for booking
    pub availability: bool,
    /// ID of the user who listed the property
    pub user_id: String,
    pub image_url: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Payload for creating or updating a property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_availability() -> bool {
    true
}

/// A reservation of a property for a date range.
///
/// `total_price` is a snapshot taken at booking time from the property's
/// nightly rate; it is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    /// ID of the renter who created the booking
    pub user_id: String,
    pub property_id: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// A booking together with its referenced property, as returned by the
/// booking list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWithProperty {
    #[serde(flatten)]
    pub booking: Booking,
    pub property: Property,
}

/// Payload for creating a booking. There is deliberately no price field:
/// the server computes the total from the property's current rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInput {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub property_id: String,
}

/// Email/password pair for register and login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// The authenticated identity behind a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

/// Issued on register/login; the client stores the token and attaches it
/// as `Authorization: Bearer <token>` on authenticated requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    pub user: AuthUser,
}

/// Body of `{"success": true}` responses from delete/logout endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_input_defaults_availability_to_true() {
        let input: PropertyInput = serde_json::from_str(
            r#"{"name":"Cabin","description":"Cozy","location":"Åre","price_per_night":500.0}"#,
        )
        .unwrap();
        assert!(input.availability);
        assert!(input.image_url.is_none());
    }

    #[test]
    fn booking_dates_serialize_as_iso_calendar_dates() {
        let input = BookingInput {
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            property_id: "prop-1".to_string(),
        };
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"check_in_date\":\"2024-06-01\""));
        assert!(json.contains("\"check_out_date\":\"2024-06-04\""));
    }

    #[test]
    fn booking_with_property_flattens_booking_fields() {
        let item = BookingWithProperty {
            booking: Booking {
                id: "b-1".to_string(),
                check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                check_out_date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
                total_price: 1500.0,
                user_id: "u-1".to_string(),
                property_id: "p-1".to_string(),
                created_at: "2024-05-20T12:00:00Z".to_string(),
            },
            property: Property {
                id: "p-1".to_string(),
                name: "Cabin".to_string(),
                description: "Cozy".to_string(),
                location: "Åre".to_string(),
                price_per_night: 500.0,
                availability: true,
                user_id: "u-2".to_string(),
                image_url: None,
                created_at: "2024-05-01T08:00:00Z".to_string(),
            },
        };
        let value: serde_json::Value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "b-1");
        assert_eq!(value["total_price"], 1500.0);
        assert_eq!(value["property"]["name"], "Cabin");
    }
}
