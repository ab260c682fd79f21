//! IU Collab Backend
//!
//! Stores CVs and events submitted by platform users and serves them per owner email.

mod api;
mod config;
mod db;
mod errors;
mod models;
mod service;
mod validation;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::DocumentStore;
use models::{Cv, Event};
use service::RecordService;

/// Application state shared across all handlers.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub cvs: RecordService<Cv>,
    pub events: RecordService<Event>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            cvs: RecordService::new(store.clone()),
            events: RecordService::new(store),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting IU Collab Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    if config.debug {
        tracing::warn!("Debug mode is enabled");
    }

    // Connect to the document store
    let store = db::connect(&config.database_url).await?;

    let bind_addr = config.bind_addr;
    let state = AppState::new(store);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // CVs
        .route("/cvs", post(api::create_record::<Cv>))
        .route(
            "/cvs/{email}",
            get(api::list_records::<Cv>).delete(api::delete_records::<Cv>),
        )
        // Events
        .route("/events", post(api::create_record::<Event>))
        .route("/add_event", post(api::create_record::<Event>))
        .route(
            "/events/{email}",
            get(api::list_records::<Event>).delete(api::delete_records::<Event>),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
