use anyhow::Result;
use chrono::NaiveDate;
use shared::{AuthUser, Booking, BookingWithProperty, Property};
use sqlx::{migrate::MigrateDatabase, Executor, Row, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:staybook.db";

/// DbConnection manages all marketplace storage: users, sessions,
/// properties and bookings.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database, honoring DATABASE_URL if set
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // raw execute: the schema is several statements in one string
        pool.execute(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS properties (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                location TEXT NOT NULL,
                price_per_night REAL NOT NULL CHECK (price_per_night > 0),
                availability INTEGER NOT NULL DEFAULT 1,
                user_id TEXT NOT NULL REFERENCES users(id),
                image_url TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS bookings (
                id TEXT PRIMARY KEY,
                check_in_date TEXT NOT NULL,
                check_out_date TEXT NOT NULL,
                total_price REAL NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id),
                property_id TEXT NOT NULL REFERENCES properties(id),
                created_at TEXT NOT NULL
            );
            "#,
        )
        .await?;

        Ok(())
    }

    /// Get the underlying SQLite pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // --- users & sessions ---

    pub async fn insert_user(&self, user: &AuthUser, password_hash: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(password_hash)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// Look up a user's identity and password hash by email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<(AuthUser, String)>> {
        let row = sqlx::query("SELECT id, email, password_hash FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| {
            (
                AuthUser {
                    id: r.get("id"),
                    email: r.get("email"),
                },
                r.get("password_hash"),
            )
        }))
    }

    pub async fn insert_session(&self, token: &str, user_id: &str) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(token)
            .bind(user_id)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    /// Resolve a bearer token to the user it was issued to
    pub async fn find_session_user(&self, token: &str) -> Result<Option<AuthUser>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.email
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(row.map(|r| AuthUser {
            id: r.get("id"),
            email: r.get("email"),
        }))
    }

    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- properties ---

    pub async fn insert_property(&self, property: &Property) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO properties
                (id, name, description, location, price_per_night, availability,
                 user_id, image_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&property.id)
        .bind(&property.name)
        .bind(&property.description)
        .bind(&property.location)
        .bind(property.price_per_night)
        .bind(property.availability)
        .bind(&property.user_id)
        .bind(&property.image_url)
        .bind(&property.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// All properties, newest first
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query("SELECT * FROM properties ORDER BY created_at DESC")
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(property_from_row).collect()
    }

    /// Properties listed by one owner, newest first
    pub async fn list_properties_by_owner(&self, user_id: &str) -> Result<Vec<Property>> {
        let rows =
            sqlx::query("SELECT * FROM properties WHERE user_id = ? ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(&*self.pool)
                .await?;
        rows.iter().map(property_from_row).collect()
    }

    pub async fn get_property(&self, id: &str) -> Result<Option<Property>> {
        let row = sqlx::query("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(property_from_row).transpose()
    }

    /// Update a property; the row filter includes the owner so users can
    /// only mutate their own listings. Returns the updated row if any.
    pub async fn update_property(
        &self,
        id: &str,
        user_id: &str,
        input: &shared::PropertyInput,
    ) -> Result<Option<Property>> {
        let result = sqlx::query(
            r#"
            UPDATE properties
            SET name = ?, description = ?, location = ?, price_per_night = ?,
                availability = ?, image_url = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.location)
        .bind(input.price_per_night)
        .bind(input.availability)
        .bind(&input.image_url)
        .bind(id)
        .bind(user_id)
        .execute(&*self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_property(id).await
    }

    pub async fn delete_property(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- bookings ---

    pub async fn insert_booking(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings
                (id, check_in_date, check_out_date, total_price, user_id,
                 property_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(booking.check_in_date.to_string())
        .bind(booking.check_out_date.to_string())
        .bind(booking.total_price)
        .bind(&booking.user_id)
        .bind(&booking.property_id)
        .bind(&booking.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    /// One user's bookings with their properties embedded, newest first
    pub async fn list_bookings_for_user(&self, user_id: &str) -> Result<Vec<BookingWithProperty>> {
        let rows = sqlx::query(&format!(
            "{} WHERE b.user_id = ? ORDER BY b.created_at DESC",
            BOOKING_JOIN
        ))
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        rows.iter().map(booking_with_property_from_row).collect()
    }

    pub async fn get_booking(&self, id: &str) -> Result<Option<BookingWithProperty>> {
        let row = sqlx::query(&format!("{} WHERE b.id = ?", BOOKING_JOIN))
            .bind(id)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(booking_with_property_from_row).transpose()
    }

    /// Delete a booking; scoped to the renter who created it.
    pub async fn delete_booking(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_bookings(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM bookings")
            .fetch_one(&*self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

const BOOKING_JOIN: &str = r#"
    SELECT b.id, b.check_in_date, b.check_out_date, b.total_price,
           b.user_id, b.property_id, b.created_at,
           p.id AS p_id, p.name AS p_name, p.description AS p_description,
           p.location AS p_location, p.price_per_night AS p_price_per_night,
           p.availability AS p_availability, p.user_id AS p_user_id,
           p.image_url AS p_image_url, p.created_at AS p_created_at
    FROM bookings b
    JOIN properties p ON p.id = b.property_id
"#;

fn property_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Property> {
    Ok(Property {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        location: row.get("location"),
        price_per_night: row.get("price_per_night"),
        availability: row.get("availability"),
        user_id: row.get("user_id"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    })
}

fn booking_with_property_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<BookingWithProperty> {
    Ok(BookingWithProperty {
        booking: Booking {
            id: row.get("id"),
            check_in_date: parse_date(row.get("check_in_date"))?,
            check_out_date: parse_date(row.get("check_out_date"))?,
            total_price: row.get("total_price"),
            user_id: row.get("user_id"),
            property_id: row.get("property_id"),
            created_at: row.get("created_at"),
        },
        property: Property {
            id: row.get("p_id"),
            name: row.get("p_name"),
            description: row.get("p_description"),
            location: row.get("p_location"),
            price_per_night: row.get("p_price_per_night"),
            availability: row.get("p_availability"),
            user_id: row.get("p_user_id"),
            image_url: row.get("p_image_url"),
            created_at: row.get("p_created_at"),
        },
    })
}

fn parse_date(raw: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid stored date {:?}: {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PropertyInput;

    async fn setup_test() -> DbConnection {
        DbConnection::init_test()
            .await
            .expect("Failed to create test database")
    }

    async fn seed_user(db: &DbConnection, email: &str) -> AuthUser {
        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
        };
        db.insert_user(&user, "hash").await.expect("insert user");
        user
    }

    fn sample_property(owner: &AuthUser) -> Property {
        Property {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Forest cabin".to_string(),
            description: "Two beds, sauna".to_string(),
            location: "Åre".to_string(),
            price_per_night: 500.0,
            availability: true,
            user_id: owner.id.clone(),
            image_url: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_property() {
        let db = setup_test().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let property = sample_property(&owner);

        db.insert_property(&property).await.expect("insert");

        let fetched = db.get_property(&property.id).await.expect("get");
        assert_eq!(fetched, Some(property));
    }

    #[tokio::test]
    async fn test_get_nonexistent_property() {
        let db = setup_test().await;
        let fetched = db.get_property("missing").await.expect("get");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_list_properties_by_owner_filters() {
        let db = setup_test().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;

        db.insert_property(&sample_property(&alice)).await.unwrap();
        db.insert_property(&sample_property(&alice)).await.unwrap();
        db.insert_property(&sample_property(&bob)).await.unwrap();

        let mine = db.list_properties_by_owner(&alice.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|p| p.user_id == alice.id));
        assert_eq!(db.list_properties().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_property_scoped_to_owner() {
        let db = setup_test().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;
        let property = sample_property(&alice);
        db.insert_property(&property).await.unwrap();

        let input = PropertyInput {
            name: "Renamed cabin".to_string(),
            description: property.description.clone(),
            location: property.location.clone(),
            price_per_night: 600.0,
            availability: false,
            image_url: Some("https://img.example/cabin.jpg".to_string()),
        };

        // not the owner: no rows match
        let denied = db
            .update_property(&property.id, &bob.id, &input)
            .await
            .unwrap();
        assert!(denied.is_none());

        let updated = db
            .update_property(&property.id, &alice.id, &input)
            .await
            .unwrap()
            .expect("owner update succeeds");
        assert_eq!(updated.name, "Renamed cabin");
        assert_eq!(updated.price_per_night, 600.0);
        assert!(!updated.availability);
    }

    #[tokio::test]
    async fn test_delete_property_scoped_to_owner() {
        let db = setup_test().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;
        let property = sample_property(&alice);
        db.insert_property(&property).await.unwrap();

        assert!(!db.delete_property(&property.id, &bob.id).await.unwrap());
        assert!(db.delete_property(&property.id, &alice.id).await.unwrap());
        assert!(db.get_property(&property.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bookings_round_trip_with_embedded_property() {
        let db = setup_test().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let renter = seed_user(&db, "renter@example.com").await;
        let property = sample_property(&owner);
        db.insert_property(&property).await.unwrap();

        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
            total_price: 1500.0,
            user_id: renter.id.clone(),
            property_id: property.id.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        db.insert_booking(&booking).await.unwrap();

        let listed = db.list_bookings_for_user(&renter.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].booking, booking);
        assert_eq!(listed[0].property, property);

        let fetched = db.get_booking(&booking.id).await.unwrap().unwrap();
        assert_eq!(fetched.booking.total_price, 1500.0);
    }

    #[tokio::test]
    async fn test_bookings_listed_newest_first() {
        let db = setup_test().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let renter = seed_user(&db, "renter@example.com").await;
        let property = sample_property(&owner);
        db.insert_property(&property).await.unwrap();

        for (i, created_at) in ["2024-05-01T10:00:00Z", "2024-05-02T10:00:00Z"]
            .iter()
            .enumerate()
        {
            db.insert_booking(&Booking {
                id: format!("b-{}", i),
                check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                check_out_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
                total_price: 500.0,
                user_id: renter.id.clone(),
                property_id: property.id.clone(),
                created_at: created_at.to_string(),
            })
            .await
            .unwrap();
        }

        let listed = db.list_bookings_for_user(&renter.id).await.unwrap();
        assert_eq!(listed[0].booking.id, "b-1");
        assert_eq!(listed[1].booking.id, "b-0");
    }

    #[tokio::test]
    async fn test_delete_booking_scoped_to_renter() {
        let db = setup_test().await;
        let owner = seed_user(&db, "owner@example.com").await;
        let renter = seed_user(&db, "renter@example.com").await;
        let property = sample_property(&owner);
        db.insert_property(&property).await.unwrap();

        let booking = Booking {
            id: "b-1".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            total_price: 500.0,
            user_id: renter.id.clone(),
            property_id: property.id.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        db.insert_booking(&booking).await.unwrap();

        // the property owner cannot delete a renter's booking
        assert!(!db.delete_booking("b-1", &owner.id).await.unwrap());
        assert!(db.delete_booking("b-1", &renter.id).await.unwrap());
        assert_eq!(db.count_bookings().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sessions_resolve_and_delete() {
        let db = setup_test().await;
        let user = seed_user(&db, "user@example.com").await;

        db.insert_session("tok-1", &user.id).await.unwrap();
        let resolved = db.find_session_user("tok-1").await.unwrap();
        assert_eq!(resolved, Some(user.clone()));

        assert!(db.delete_session("tok-1").await.unwrap());
        assert!(db.find_session_user("tok-1").await.unwrap().is_none());
        assert!(!db.delete_session("tok-1").await.unwrap());
    }
}
