//! HTTP API module
//!
//! The emulated launcher: tap the app icon and look at its glance.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::Device;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(device: Arc<Device>) -> Router {
    Router::new()
        .route("/launch", post(launch_handler))
        .route("/glance", get(glance_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(device)
}
