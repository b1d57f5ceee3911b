//! Contact form schema and the submission record built from it.
//!
//! ```text
//! form body → ContactForm → ContactSubmission::from_form() → Notifier
//! ```

pub mod types;

pub use types::{ContactForm, ContactSubmission, NOT_AVAILABLE, UNKNOWN_SENDER};
