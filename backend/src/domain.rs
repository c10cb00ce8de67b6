use shared::{
    pricing, AuthUser, Booking, BookingInput, BookingWithProperty, Property, PropertyInput,
};
use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::error::ApiError;

/// CRUD over property listings. Mutations are scoped to the listing owner
/// at the storage layer.
#[derive(Clone)]
pub struct PropertyService {
    db: DbConnection,
}

impl PropertyService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Property>, ApiError> {
        Ok(self.db.list_properties().await?)
    }

    pub async fn list_mine(&self, user_id: &str) -> Result<Vec<Property>, ApiError> {
        Ok(self.db.list_properties_by_owner(user_id).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Property, ApiError> {
        self.db
            .get_property(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Not found".to_string()))
    }

    pub async fn create(
        &self,
        owner: &AuthUser,
        input: PropertyInput,
    ) -> Result<Property, ApiError> {
        validate_property_input(&input)?;

        let property = Property {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            location: input.location,
            price_per_night: input.price_per_night,
            availability: input.availability,
            user_id: owner.id.clone(),
            image_url: input.image_url,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.db.insert_property(&property).await?;
        info!("user {} listed property {}", owner.id, property.id);
        Ok(property)
    }

    pub async fn update(
        &self,
        id: &str,
        owner: &AuthUser,
        input: PropertyInput,
    ) -> Result<Property, ApiError> {
        validate_property_input(&input)?;
        self.db
            .update_property(id, &owner.id, &input)
            .await?
            .ok_or_else(|| ApiError::NotFound("Not found".to_string()))
    }

    /// Deleting a listing that does not exist (or is not yours) is not an
    /// error; the endpoint reports success either way.
    pub async fn delete(&self, id: &str, owner: &AuthUser) -> Result<(), ApiError> {
        let deleted = self.db.delete_property(id, &owner.id).await?;
        if deleted {
            info!("user {} deleted property {}", owner.id, id);
        }
        Ok(())
    }
}

fn validate_property_input(input: &PropertyInput) -> Result<(), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::Validation("Name is required".to_string()));
    }
    if input.price_per_night <= 0.0 {
        return Err(ApiError::Validation(
            "price_per_night must be positive".to_string(),
        ));
    }
    Ok(())
}

/// The booking authority: the one place a booking is accepted or rejected.
///
/// The flow is validate (dates), look up the property, price the stay from
/// the property's current nightly rate, persist. The client's preview price
/// never reaches this code; the input carries no price field at all.
/// There is no overlap detection: two bookings for the same property and
/// overlapping ranges both succeed.
#[derive(Clone)]
pub struct BookingService {
    db: DbConnection,
}

impl BookingService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn list_for(&self, user_id: &str) -> Result<Vec<BookingWithProperty>, ApiError> {
        Ok(self.db.list_bookings_for_user(user_id).await?)
    }

    pub async fn get(&self, id: &str) -> Result<BookingWithProperty, ApiError> {
        self.db
            .get_booking(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Not found".to_string()))
    }

    pub async fn create(
        &self,
        renter: &AuthUser,
        input: BookingInput,
    ) -> Result<Booking, ApiError> {
        if input.check_out_date <= input.check_in_date {
            return Err(ApiError::Validation(
                "check_out_date must be after check_in_date".to_string(),
            ));
        }

        let property = self
            .db
            .get_property(&input.property_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

        let (nights, total_price) = pricing::quote(
            input.check_in_date,
            input.check_out_date,
            property.price_per_night,
        );

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            check_in_date: input.check_in_date,
            check_out_date: input.check_out_date,
            total_price,
            user_id: renter.id.clone(),
            property_id: property.id,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.db.insert_booking(&booking).await?;
        info!(
            "user {} booked property {} for {} nights, total {}",
            renter.id, booking.property_id, nights, total_price
        );
        Ok(booking)
    }

    pub async fn delete(&self, id: &str, renter: &AuthUser) -> Result<(), ApiError> {
        let deleted = self.db.delete_booking(id, &renter.id).await?;
        if deleted {
            info!("user {} cancelled booking {}", renter.id, id);
        }
        Ok(())
    }
}
