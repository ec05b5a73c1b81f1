//! Trade tick representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single trade: when it happened, at what price, and how much traded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp of the trade (UTC).
    pub timestamp: DateTime<Utc>,
    /// Trade price.
    pub price: f64,
    /// Traded volume. Only volume bars look at it.
    pub volume: f64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            price,
            volume,
        }
    }

    /// Returns the traded notional (price * volume).
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.price * self.volume
    }
}
