//! HTTP endpoint handlers.
//!
//! The contact handler only:
//! 1. Extracts the form into a [`ContactSubmission`]
//! 2. Hands it to the notifier
//! 3. Answers with an HTML fragment
//!
//! Delivery problems are the notifier's business; the visitor gets a
//! success fragment as long as the form itself was readable.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::contact::{ContactForm, ContactSubmission};
use crate::notify::{DeliverySnapshot, DeliveryStats, Notifier};
use crate::web::fragments;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
    pub stats: Arc<DeliveryStats>,
}

impl AppState {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
            stats: Arc::new(DeliveryStats::new()),
        }
    }
}

// =============================================================================
// Root
// =============================================================================

/// Static banner confirming the service is up.
pub async fn root() -> Response {
    fragments::html(StatusCode::OK, fragments::ROOT_BANNER)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mail_configured: bool,
    pub deliveries: DeliverySnapshot,
}

/// Health check endpoint, including delivery counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mail_configured: state.notifier.is_enabled(),
        deliveries: state.stats.snapshot(),
    })
}

// =============================================================================
// Contact Form
// =============================================================================

/// Contact form endpoint.
///
/// Returns 500 with the error fragment only when the body cannot be read as
/// a form. Notification failures still produce the success fragment.
pub async fn create_contact(
    State(state): State<AppState>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            error!(
                error = %rejection,
                rejection_status = rejection.status().as_u16(),
                "contact_form_rejected"
            );
            return fragments::error();
        }
    };

    let submission = ContactSubmission::from_form(form);

    info!(
        name = %submission.display_name(),
        provided_fields = submission.provided_fields(),
        "contact_received"
    );

    let outcome = state.notifier.notify(&submission).await;
    let outcome_total = state.stats.record(outcome);

    info!(
        outcome = outcome.as_str(),
        outcome_total = outcome_total,
        "contact_handled"
    );

    fragments::success()
}

/// Turn a panic inside a handler into the error fragment.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "request_handler_panicked");

    fragments::error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_panic_returns_error_fragment() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
