//! Common interface over the bar policies.

use tickbars_types::{Bar, BarInterval, BarSpec, Tick, VolumeThreshold};
use tracing::debug;

use crate::{TickBarAggregator, TimeBarAggregator, VolumeBarAggregator};

/// Streaming bar builder.
///
/// Ticks are fed in timestamp order through [`process`](Self::process);
/// [`finish`](Self::finish) flushes whatever the policy emits at end of input.
pub trait BarAggregator {
    /// Processes a tick, appending every bar it closes to `bars`.
    fn process(&mut self, tick: &Tick, bars: &mut Vec<Bar>);

    /// Finishes aggregation, appending any end-of-input bar to `bars`.
    fn finish(self, bars: &mut Vec<Bar>)
    where
        Self: Sized;

    /// Runs the aggregator over a whole tick sequence.
    fn run(mut self, ticks: &[Tick]) -> Vec<Bar>
    where
        Self: Sized,
    {
        let mut bars = Vec::new();
        for tick in ticks {
            self.process(tick, &mut bars);
        }
        self.finish(&mut bars);
        bars
    }
}

/// Aggregator for any [`BarSpec`], chosen at runtime.
#[derive(Debug, Clone)]
pub enum Aggregator {
    /// Tick-count bars.
    Tick(TickBarAggregator),
    /// Time-interval bars.
    Time(TimeBarAggregator),
    /// Volume-threshold bars.
    Volume(VolumeBarAggregator),
}

impl Aggregator {
    /// Creates the aggregator matching `spec`.
    #[must_use]
    pub const fn new(spec: &BarSpec) -> Self {
        match *spec {
            BarSpec::Tick(count) => Self::Tick(TickBarAggregator::new(count)),
            BarSpec::Time(interval) => Self::Time(TimeBarAggregator::new(interval)),
            BarSpec::Volume(threshold) => Self::Volume(VolumeBarAggregator::new(threshold)),
        }
    }
}

impl From<&BarSpec> for Aggregator {
    fn from(spec: &BarSpec) -> Self {
        Self::new(spec)
    }
}

impl BarAggregator for Aggregator {
    fn process(&mut self, tick: &Tick, bars: &mut Vec<Bar>) {
        match self {
            Self::Tick(agg) => agg.process(tick, bars),
            Self::Time(agg) => agg.process(tick, bars),
            Self::Volume(agg) => agg.process(tick, bars),
        }
    }

    fn finish(self, bars: &mut Vec<Bar>) {
        match self {
            Self::Tick(agg) => agg.finish(bars),
            Self::Time(agg) => agg.finish(bars),
            Self::Volume(agg) => agg.finish(bars),
        }
    }
}

/// Aggregates an ordered tick sequence into bars according to `spec`.
///
/// A zero threshold and an empty tick sequence both give an empty result.
#[must_use]
pub fn aggregate(ticks: &[Tick], spec: &BarSpec) -> Vec<Bar> {
    let bars = Aggregator::new(spec).run(ticks);
    let gaps = bars.iter().filter(|bar| bar.is_gap()).count();
    debug!(
        spec = %spec,
        ticks = ticks.len(),
        bars = bars.len(),
        gaps,
        "aggregation complete"
    );
    bars
}

/// Groups ticks into bars of `threshold` ticks each.
#[must_use]
pub fn tick_bars(ticks: &[Tick], threshold: u64) -> Vec<Bar> {
    aggregate(ticks, &BarSpec::Tick(threshold))
}

/// Groups ticks into fixed time intervals anchored at the first tick.
#[must_use]
pub fn time_bars(ticks: &[Tick], interval: BarInterval) -> Vec<Bar> {
    aggregate(ticks, &BarSpec::Time(interval))
}

/// Groups ticks into bars of `threshold` cumulative volume each.
#[must_use]
pub fn volume_bars(ticks: &[Tick], threshold: VolumeThreshold) -> Vec<Bar> {
    aggregate(ticks, &BarSpec::Volume(threshold))
}
