//! Volume-threshold bars.

use tickbars_types::{Bar, Tick, VolumeThreshold};
use tracing::{trace, warn};

use crate::{Accumulator, BarAggregator};

/// Closes a bar each time cumulative volume reaches the threshold.
///
/// A tick carrying several thresholds' worth of volume closes several bars,
/// all stamped with that tick's timestamp. Volume beyond a closed bar carries
/// over into a new bar opened at the closed bar's close price. Residual
/// volume left at end of input never forms a bar.
///
/// One tick closes at most [`max_split`](Self::max_split) bars. Whole
/// thresholds beyond that are dropped with a warning.
#[derive(Debug, Clone)]
pub struct VolumeBarAggregator {
    threshold: VolumeThreshold,
    volume: f64,
    current: Accumulator,
    max_split: u64,
}

/// Default cap on the bars a single tick may close.
pub const DEFAULT_MAX_SPLIT: u64 = 1 << 16;

impl VolumeBarAggregator {
    /// Creates an aggregator for the given volume threshold.
    ///
    /// A zero threshold produces no bars.
    #[must_use]
    pub const fn new(threshold: VolumeThreshold) -> Self {
        Self {
            threshold,
            volume: 0.0,
            current: Accumulator::new(),
            max_split: DEFAULT_MAX_SPLIT,
        }
    }

    /// Sets the most bars one tick may close. Values below 1 are raised to 1.
    #[must_use]
    pub const fn with_max_split(mut self, max_split: u64) -> Self {
        self.max_split = if max_split == 0 { 1 } else { max_split };
        self
    }

    /// Returns the per-tick bar cap.
    #[must_use]
    pub const fn max_split(&self) -> u64 {
        self.max_split
    }

    /// Returns the volume threshold.
    #[must_use]
    pub const fn threshold(&self) -> VolumeThreshold {
        self.threshold
    }

    /// Returns the volume accumulated toward the next bar.
    #[must_use]
    pub const fn residual_volume(&self) -> f64 {
        self.volume
    }
}

impl BarAggregator for VolumeBarAggregator {
    fn process(&mut self, tick: &Tick, bars: &mut Vec<Bar>) {
        if self.threshold.is_zero() {
            return;
        }
        let threshold = self.threshold.get();

        self.current = self.current.update(tick.price);
        self.volume += tick.volume;
        if self.volume < threshold {
            return;
        }

        // Repeated subtraction stalls once the threshold drops below the
        // volume's precision; the remainder is exact.
        let residual = self.volume % threshold;
        let closes = ((self.volume - residual) / threshold).round().max(1.0);
        let emitted = if closes > self.max_split as f64 {
            warn!(
                timestamp = %tick.timestamp,
                closes,
                max = self.max_split,
                "tick volume exceeds split limit, surplus bars dropped"
            );
            self.max_split
        } else {
            closes as u64
        };

        let first = self.current.to_bar(tick.timestamp);
        let collapsed = Accumulator::seeded(first.close).to_bar(tick.timestamp);
        bars.push(first);
        bars.extend((1..emitted).map(|_| collapsed));
        trace!(timestamp = %tick.timestamp, bars = emitted, residual, "volume bars closed");

        self.volume = residual;
        // Only an exact fill starts the next bar from scratch.
        self.current = if residual == 0.0 {
            Accumulator::new()
        } else {
            Accumulator::seeded(first.close)
        };
    }

    fn finish(self, _bars: &mut Vec<Bar>) {}
}
