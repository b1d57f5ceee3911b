//! Cross-origin policy.
//!
//! Only configured origins may call the API from a browser. Methods and
//! request headers are mirrored back and credentials are allowed, which
//! rules out wildcards.

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

/// Build the CORS layer for the given origins.
///
/// Origins that are not valid header values are logged and ignored.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|origin| {
            // Wildcards cannot be combined with credentialed requests.
            let wildcard = origin.as_str() == "*";
            if wildcard {
                warn!("cors_wildcard_origin_ignored");
            }
            !wildcard
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "cors_origin_invalid");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
