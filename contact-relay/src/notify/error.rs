//! Notification error types.

use std::time::Duration;

use thiserror::Error;

/// Reasons a notification could not be delivered to the relay.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("smtp exchange timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl NotifyError {
    /// Short machine-friendly label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::InvalidAddress { .. } => "invalid_address",
            NotifyError::Build(_) => "build",
            NotifyError::Transport(_) => "transport",
            NotifyError::Timeout(_) => "timeout",
        }
    }
}
