//! Delivery counters.
//!
//! Failed deliveries are swallowed on purpose, so these counters are how an
//! operator notices them. They are exposed on `/health`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Result of a single notification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Accepted by the relay
    Sent,
    /// Mail settings missing or placeholders; no connection attempted
    Skipped,
    /// Build, transport, auth, or timeout failure
    Failed,
}

impl DeliveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOutcome::Sent => "sent",
            DeliveryOutcome::Skipped => "skipped",
            DeliveryOutcome::Failed => "failed",
        }
    }
}

/// Process-wide delivery counters.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    sent: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`DeliveryStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliverySnapshot {
    pub sent: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an outcome and return the new total for it.
    pub fn record(&self, outcome: DeliveryOutcome) -> u64 {
        let counter = match outcome {
            DeliveryOutcome::Sent => &self.sent,
            DeliveryOutcome::Skipped => &self.skipped,
            DeliveryOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn snapshot(&self) -> DeliverySnapshot {
        DeliverySnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
