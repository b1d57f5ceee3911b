//! Notification module: turns a contact submission into an email.
//!
//! This module provides:
//! - The [`Notifier`] seam the web handler calls into
//! - Message composition (subject and plain-text body)
//! - The SMTP implementation with its STARTTLS relay client
//! - Delivery counters an operator can watch
//!
//! ## Flow
//!
//! ```text
//! ContactSubmission → compose_message() → SmtpNotifier → mail relay
//! ```
//!
//! Delivery failures never reach the caller. They are logged here and
//! counted in [`DeliveryStats`].

pub mod error;
pub mod message;
pub mod smtp;
pub mod stats;

use async_trait::async_trait;

use crate::contact::ContactSubmission;

pub use error::NotifyError;
pub use message::{compose_message, render_body, render_subject};
pub use smtp::{SmtpNotifier, SmtpRelay};
pub use stats::{DeliveryOutcome, DeliverySnapshot, DeliveryStats};

/// Dispatches a notification for one contact submission.
///
/// Implementations swallow every failure and report it only through the
/// returned [`DeliveryOutcome`] and their own logs.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notify about a submission.
    async fn notify(&self, submission: &ContactSubmission) -> DeliveryOutcome;

    /// Whether this notifier is able to reach a relay at all.
    fn is_enabled(&self) -> bool;
}
