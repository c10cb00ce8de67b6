use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod auth;
mod db;
mod domain;
mod error;
mod rest;

use auth::AuthService;
use domain::{BookingService, PropertyService};
use rest::{api_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Setting up database");
    let db = db::DbConnection::init().await?;

    let state = AppState::new(
        AuthService::new(db.clone()),
        PropertyService::new(db.clone()),
        BookingService::new(db),
    );

    // CORS setup to allow the frontend to make requests
    let cors_origin =
        std::env::var("STAYBOOK_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = api_router(state).layer(cors);

    let addr: SocketAddr = std::env::var("STAYBOOK_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
