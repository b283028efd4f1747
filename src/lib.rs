//! Field-service estimating backend.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod estimator;
pub mod routes;

use estimator::models::AppSettings;

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    /// Default business settings, used when a request carries none
    pub settings: Option<Arc<AppSettings>>,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api/estimator", estimator::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
