//! Contacto - contact form relay.
//!
//! Receives contact form submissions over HTTP and relays each one as an
//! email notification through an SMTP relay.
//!
//! ## Architecture
//!
//! ```text
//! Browser form → POST /contacto/ → ContactSubmission → SmtpNotifier → mail relay
//! ```
//!
//! No submission outlives its request. The only process-wide state is the
//! configuration and the delivery counters.

pub mod config;
pub mod contact;
pub mod notify;
pub mod web;

// Re-export commonly used types
pub use config::{Config, MailConfig};
pub use contact::{ContactForm, ContactSubmission};
pub use notify::{DeliveryOutcome, DeliveryStats, Notifier, NotifyError, SmtpNotifier, SmtpRelay};
pub use web::{router, AppState};
