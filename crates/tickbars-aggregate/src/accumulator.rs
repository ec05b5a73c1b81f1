//! In-progress OHLC state shared by every bar policy.

use chrono::{DateTime, Utc};
use tickbars_types::Bar;

/// Open, high, low and close of a bar that has seen at least one price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    /// First price of the bar.
    pub open: f64,
    /// Highest price so far.
    pub high: f64,
    /// Lowest price so far.
    pub low: f64,
    /// Latest price.
    pub close: f64,
}

impl Ohlc {
    /// Creates a bar state with all four fields at `price`.
    #[must_use]
    pub const fn flat(price: f64) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }
}

/// OHLC accumulator for the bar currently being built.
///
/// Empty until the first price arrives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Accumulator {
    state: Option<Ohlc>,
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Creates an accumulator already holding `price` as open, high, low and close.
    #[must_use]
    pub const fn seeded(price: f64) -> Self {
        Self {
            state: Some(Ohlc::flat(price)),
        }
    }

    /// Folds a price into the bar.
    ///
    /// The first price sets all four fields. Later prices widen high/low and
    /// always replace close.
    #[must_use]
    pub fn update(self, price: f64) -> Self {
        let state = match self.state {
            None => Ohlc::flat(price),
            Some(ohlc) => Ohlc {
                open: ohlc.open,
                high: ohlc.high.max(price),
                low: ohlc.low.min(price),
                close: price,
            },
        };
        Self { state: Some(state) }
    }

    /// Returns true if no price has been folded in yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    /// Returns the current state, if any.
    #[must_use]
    pub const fn state(&self) -> Option<Ohlc> {
        self.state
    }

    /// Snapshots the accumulator as a bar. An empty accumulator yields a gap bar.
    #[must_use]
    pub fn to_bar(&self, timestamp: DateTime<Utc>) -> Bar {
        match self.state {
            Some(ohlc) => Bar::new(timestamp, ohlc.open, ohlc.high, ohlc.low, ohlc.close),
            None => Bar::gap(timestamp),
        }
    }
}
