//! Web server module for the contact form.
//!
//! This module provides:
//! - `POST /contacto/`: form submission, answered with an HTML fragment
//! - `GET /`: static banner
//! - `GET /health`: JSON status with delivery counters
//!
//! CORS, request tracing and panic recovery are applied as layers.

pub mod cors;
pub mod fragments;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use cors::cors_layer;
pub use handlers::{create_contact, handle_panic, health, root, AppState, HealthResponse};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/contacto/", post(create_contact))
        .route("/contacto", post(create_contact))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
