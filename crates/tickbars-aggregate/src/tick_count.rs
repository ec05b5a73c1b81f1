//! Tick-count bars.

use tickbars_types::{Bar, Tick};
use tracing::{debug, trace};

use crate::{Accumulator, BarAggregator};

/// Closes a bar every `threshold` ticks.
///
/// Each bar is stamped with the timestamp of the tick that completed it.
/// Ticks left over at the end of input never form a bar.
#[derive(Debug, Clone)]
pub struct TickBarAggregator {
    threshold: u64,
    count: u64,
    current: Accumulator,
}

impl TickBarAggregator {
    /// Creates an aggregator closing a bar every `threshold` ticks.
    ///
    /// A threshold of zero produces no bars.
    #[must_use]
    pub const fn new(threshold: u64) -> Self {
        Self {
            threshold,
            count: 0,
            current: Accumulator::new(),
        }
    }

    /// Returns the number of ticks per bar.
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Returns the number of ticks in the bar being built.
    #[must_use]
    pub const fn pending(&self) -> u64 {
        self.count
    }
}

impl BarAggregator for TickBarAggregator {
    fn process(&mut self, tick: &Tick, bars: &mut Vec<Bar>) {
        if self.threshold == 0 {
            return;
        }

        self.current = self.current.update(tick.price);
        self.count += 1;

        if self.count == self.threshold {
            let bar = self.current.to_bar(tick.timestamp);
            trace!(timestamp = %bar.timestamp, "tick bar closed");
            bars.push(bar);
            self.current = Accumulator::new();
            self.count = 0;
        }
    }

    fn finish(self, _bars: &mut Vec<Bar>) {
        if self.count > 0 {
            debug!(dropped = self.count, "discarding incomplete tick bar");
        }
    }
}
