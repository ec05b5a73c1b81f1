//! Time-interval bars.

use chrono::{DateTime, TimeDelta, Utc};
use tickbars_types::{Bar, BarInterval, Tick};
use tracing::{trace, warn};

use crate::{Accumulator, BarAggregator};

/// Closes bars on fixed boundaries spaced `interval` apart, starting one
/// interval after the first tick.
///
/// Bars are stamped with their closing boundary. An interval without trades
/// yields a gap bar. The interval holding the last tick is always emitted,
/// even though it has not fully elapsed.
///
/// If a boundary would fall past the largest representable timestamp the
/// run stops there: later ticks are ignored and no final bar is emitted.
#[derive(Debug, Clone)]
pub struct TimeBarAggregator {
    interval: BarInterval,
    step: TimeDelta,
    bar_end: Option<DateTime<Utc>>,
    last_price: Option<f64>,
    current: Accumulator,
    halted: bool,
}

impl TimeBarAggregator {
    /// Creates an aggregator for the given interval.
    ///
    /// A zero-length interval produces no bars.
    #[must_use]
    pub const fn new(interval: BarInterval) -> Self {
        Self {
            interval,
            step: interval.as_delta(),
            bar_end: None,
            last_price: None,
            current: Accumulator::new(),
            halted: false,
        }
    }

    /// Returns the bar interval.
    #[must_use]
    pub const fn interval(&self) -> BarInterval {
        self.interval
    }

    /// Returns the closing boundary of the bar being built, once a tick has
    /// been seen.
    #[must_use]
    pub const fn bar_end(&self) -> Option<DateTime<Utc>> {
        self.bar_end
    }

    /// Returns true once a boundary overflowed and the run stopped.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// The boundary one interval after `from`, or `None` (halting the run)
    /// when it is out of range.
    fn next_boundary(&mut self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let next = from.checked_add_signed(self.step);
        if next.is_none() {
            warn!(%from, interval = %self.interval, "bar boundary out of range, stopping");
            self.halted = true;
            self.bar_end = None;
        }
        next
    }
}

impl BarAggregator for TimeBarAggregator {
    fn process(&mut self, tick: &Tick, bars: &mut Vec<Bar>) {
        if self.interval.is_zero() || self.halted {
            return;
        }

        let bar_end = match self.bar_end {
            Some(end) => end,
            None => match self.next_boundary(tick.timestamp) {
                Some(end) => *self.bar_end.insert(end),
                None => return,
            },
        };
        self.last_price = Some(tick.price);

        if tick.timestamp < bar_end {
            self.current = self.current.update(tick.price);
            return;
        }

        bars.push(self.current.to_bar(bar_end));
        // The boundary tick opens the next bar.
        self.current = Accumulator::seeded(tick.price);

        let mut next_end = self.next_boundary(bar_end);
        while let Some(end) = next_end
            && end <= tick.timestamp
        {
            trace!(timestamp = %end, "empty interval");
            bars.push(Bar::gap(end));
            next_end = self.next_boundary(end);
        }
        self.bar_end = next_end;
    }

    fn finish(self, bars: &mut Vec<Bar>) {
        let (Some(bar_end), Some(close)) = (self.bar_end, self.last_price) else {
            return;
        };
        bars.push(Bar {
            close,
            ..self.current.to_bar(bar_end)
        });
    }
}
