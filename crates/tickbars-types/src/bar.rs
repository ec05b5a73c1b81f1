//! OHLC bar data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC bar.
///
/// A gap bar marks a time interval in which no trade happened. All four of
/// its prices are NaN, which serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar timestamp.
    ///
    /// For time bars this is the closing boundary of the interval. For tick
    /// and volume bars it is the timestamp of the tick that closed the bar.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    #[serde(with = "gap_price")]
    pub open: f64,
    /// Highest price.
    #[serde(with = "gap_price")]
    pub high: f64,
    /// Lowest price.
    #[serde(with = "gap_price")]
    pub low: f64,
    /// Closing price.
    #[serde(with = "gap_price")]
    pub close: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Creates a gap bar for an interval without trades.
    #[must_use]
    pub const fn gap(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Returns true if no trade contributed to this bar.
    #[must_use]
    pub const fn is_gap(&self) -> bool {
        self.open.is_nan() && self.high.is_nan() && self.low.is_nan() && self.close.is_nan()
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Maps NaN prices to `null` and back.
mod gap_price {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
