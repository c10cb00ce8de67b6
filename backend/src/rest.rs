use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{BookingInput, Credentials, PropertyInput, SuccessResponse};
use tracing::info;

use crate::auth::{bearer_token, AuthService};
use crate::domain::{BookingService, PropertyService};
use crate::error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub properties: PropertyService,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(auth: AuthService, properties: PropertyService, bookings: BookingService) -> Self {
        Self {
            auth,
            properties,
            bookings,
        }
    }
}

/// All routes under /api
pub fn api_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route("/properties/mine", get(list_my_properties))
        .route(
            "/properties/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/:id", get(get_booking).delete(delete_booking))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

// --- property handlers ---

async fn list_properties(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/properties");
    let properties = state.properties.list().await?;
    Ok(Json(properties))
}

async fn list_my_properties(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/properties/mine");
    let user = state.auth.require_user(&headers).await?;
    let properties = state.properties.list_mine(&user.id).await?;
    Ok(Json(properties))
}

async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/properties/{}", id);
    let property = state.properties.get(&id).await?;
    Ok(Json(property))
}

async fn create_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<PropertyInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/properties - name: {}", input.name);
    let user = state.auth.require_user(&headers).await?;
    let property = state.properties.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<PropertyInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!("PUT /api/properties/{}", id);
    let user = state.auth.require_user(&headers).await?;
    let property = state.properties.update(&id, &user, input).await?;
    Ok(Json(property))
}

async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/properties/{}", id);
    let user = state.auth.require_user(&headers).await?;
    state.properties.delete(&id, &user).await?;
    Ok(Json(SuccessResponse::ok()))
}

// --- booking handlers ---

async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/bookings");
    let user = state.auth.require_user(&headers).await?;
    let bookings = state.bookings.list_for(&user.id).await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("GET /api/bookings/{}", id);
    state.auth.require_user(&headers).await?;
    let booking = state.bookings.get(&id).await?;
    Ok(Json(booking))
}

async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<BookingInput>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "POST /api/bookings - property: {}, {} to {}",
        input.property_id, input.check_in_date, input.check_out_date
    );
    let user = state.auth.require_user(&headers).await?;
    let booking = state.bookings.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("DELETE /api/bookings/{}", id);
    let user = state.auth.require_user(&headers).await?;
    state.bookings.delete(&id, &user).await?;
    Ok(Json(SuccessResponse::ok()))
}

// --- auth handlers ---

async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/register - email: {}", credentials.email);
    let session = state.auth.register(credentials).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/login - email: {}", credentials.email);
    let session = state.auth.login(credentials).await?;
    Ok(Json(session))
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/auth/logout");
    state.auth.logout(bearer_token(&headers)).await?;
    Ok(Json(SuccessResponse::ok()))
}
