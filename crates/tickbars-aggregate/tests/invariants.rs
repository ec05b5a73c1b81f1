//! Property-based tests for bar invariants.
//!
//! Invariants checked:
//! 1. OHLC relationships: high ≥ max(open, close), low ≤ min(open, close)
//! 2. Tick bars: bar count = floor(ticks / threshold), each bar closes on the
//!    threshold-th tick
//! 3. Time bars: boundaries are evenly spaced and anchored at the first tick
//! 4. Volume bars: consumed volume plus residual equals input volume

use approx::assert_abs_diff_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use tickbars_aggregate::{
    BarAggregator, VolumeBarAggregator, aggregate, tick_bars, time_bars, volume_bars,
};
use tickbars_types::{Bar, BarInterval, BarSpec, Tick, TimeUnit, VolumeThreshold};

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 5, 12, 4, 0, 0).unwrap()
}

/// Builds ordered ticks from (millisecond gap, price, volume) triples.
fn build_ticks(raw: &[(u32, f64, u32)]) -> Vec<Tick> {
    let mut timestamp = origin();
    raw.iter()
        .map(|&(gap_ms, price, volume)| {
            timestamp += TimeDelta::milliseconds(i64::from(gap_ms));
            Tick::new(timestamp, price, f64::from(volume))
        })
        .collect()
}

fn tick_strategy() -> impl Strategy<Value = Vec<(u32, f64, u32)>> {
    prop::collection::vec((0u32..5_000, 1.0f64..1_000.0, 0u32..50), 0..200)
}

fn assert_ohlc_consistent(bars: &[Bar]) -> Result<(), TestCaseError> {
    for bar in bars.iter().filter(|bar| !bar.is_gap()) {
        prop_assert!(bar.low <= bar.high, "low must be <= high");
        prop_assert!(bar.low <= bar.open.min(bar.close), "low must be <= open, close");
        prop_assert!(bar.high >= bar.open.max(bar.close), "high must be >= open, close");
    }
    Ok(())
}

proptest! {
    #[test]
    fn ohlc_relationships_hold_for_every_policy(
        raw in tick_strategy(),
        count in 1u64..20,
        interval_ms in 1u64..10_000,
        quantum in 1u32..100,
    ) {
        let ticks = build_ticks(&raw);
        let specs = [
            BarSpec::Tick(count),
            BarSpec::Time(BarInterval::new(interval_ms, TimeUnit::Milliseconds).unwrap()),
            BarSpec::Volume(VolumeThreshold::new(f64::from(quantum)).unwrap()),
        ];
        for spec in &specs {
            assert_ohlc_consistent(&aggregate(&ticks, spec))?;
        }
    }

    #[test]
    fn tick_bar_count_is_floor_of_ticks_over_threshold(
        raw in tick_strategy(),
        threshold in 1u64..20,
    ) {
        let ticks = build_ticks(&raw);
        let bars = tick_bars(&ticks, threshold);

        prop_assert_eq!(bars.len() as u64, ticks.len() as u64 / threshold);
        for (i, bar) in bars.iter().enumerate() {
            let group = &ticks[i * threshold as usize..(i + 1) * threshold as usize];
            let last = group[group.len() - 1];
            prop_assert_eq!(bar.timestamp, last.timestamp);
            prop_assert_eq!(bar.open, group[0].price);
            prop_assert_eq!(bar.close, last.price);
        }
    }

    #[test]
    fn tick_threshold_one_mirrors_input(raw in tick_strategy()) {
        let ticks = build_ticks(&raw);
        let bars = tick_bars(&ticks, 1);

        prop_assert_eq!(bars.len(), ticks.len());
        for (bar, tick) in bars.iter().zip(&ticks) {
            prop_assert_eq!(*bar, Bar::new(tick.timestamp, tick.price, tick.price, tick.price, tick.price));
        }
    }

    #[test]
    fn time_bars_are_evenly_spaced_from_first_tick(
        raw in tick_strategy(),
        interval_ms in 1u64..10_000,
    ) {
        let ticks = build_ticks(&raw);
        let interval = BarInterval::new(interval_ms, TimeUnit::Milliseconds).unwrap();
        let step = interval.as_delta();
        let bars = time_bars(&ticks, interval);

        let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
            prop_assert!(bars.is_empty());
            return Ok(());
        };

        // Every tick boundary crossed adds one bar; the open interval adds the last.
        let span = (last.timestamp - first.timestamp).num_milliseconds() as u64;
        prop_assert_eq!(bars.len() as u64, span / interval_ms + 1);

        prop_assert_eq!(bars[0].timestamp, first.timestamp + step);
        for pair in bars.windows(2) {
            prop_assert_eq!(pair[1].timestamp - pair[0].timestamp, step);
        }
        prop_assert!(bars[bars.len() - 1].timestamp > last.timestamp);
        prop_assert!(!bars[bars.len() - 1].is_gap());
        prop_assert_eq!(bars[bars.len() - 1].close, last.price);
    }

    #[test]
    fn time_gap_bars_match_empty_intervals(
        raw in tick_strategy(),
        interval_ms in 1u64..10_000,
    ) {
        let ticks = build_ticks(&raw);
        let interval = BarInterval::new(interval_ms, TimeUnit::Milliseconds).unwrap();
        let step = interval.as_delta();

        for bar in time_bars(&ticks, interval) {
            let start = bar.timestamp - step;
            let has_ticks = ticks
                .iter()
                .any(|tick| tick.timestamp >= start && tick.timestamp < bar.timestamp);
            prop_assert_eq!(bar.is_gap(), !has_ticks, "bar at {}", bar.timestamp);
        }
    }

    #[test]
    fn volume_is_conserved(
        raw in tick_strategy(),
        quantum in 1u32..100,
    ) {
        let ticks = build_ticks(&raw);
        let threshold = VolumeThreshold::new(f64::from(quantum)).unwrap();

        let mut agg = VolumeBarAggregator::new(threshold);
        let mut bars = Vec::new();
        for tick in &ticks {
            agg.process(tick, &mut bars);
        }

        let total: f64 = ticks.iter().map(|tick| tick.volume).sum();
        let consumed = bars.len() as f64 * threshold.get();
        prop_assert_eq!(consumed + agg.residual_volume(), total);
        prop_assert!(agg.residual_volume() < threshold.get());
        prop_assert_eq!(bars, volume_bars(&ticks, threshold));
    }
}

#[test]
fn large_tick_splits_into_collapsed_bars() {
    let threshold = VolumeThreshold::new(3.0).unwrap();
    let ticks = build_ticks(&[(0, 10.0, 1), (1_000, 12.0, 12)]);
    let bars = volume_bars(&ticks, threshold);

    assert_eq!(bars.len(), 4);
    assert!(bars.iter().all(|bar| bar.timestamp == ticks[1].timestamp));
    assert_eq!(bars[0], Bar::new(ticks[1].timestamp, 10.0, 12.0, 10.0, 12.0));
    for bar in &bars[1..] {
        assert_eq!(*bar, Bar::new(ticks[1].timestamp, 12.0, 12.0, 12.0, 12.0));
    }
}

#[test]
fn fractional_volumes_leave_small_residual() {
    let start = origin();
    let ticks: Vec<Tick> = [0.25, 0.5, 0.75, 0.25]
        .into_iter()
        .enumerate()
        .map(|(i, volume)| Tick::new(start + TimeDelta::seconds(i as i64), 100.0 + i as f64, volume))
        .collect();
    let threshold = VolumeThreshold::new(0.5).unwrap();

    let mut agg = VolumeBarAggregator::new(threshold);
    let mut bars = Vec::new();
    for tick in &ticks {
        agg.process(tick, &mut bars);
    }

    assert_eq!(bars.len(), 3);
    assert_abs_diff_eq!(agg.residual_volume(), 0.25, epsilon = 1e-12);
}

#[test]
fn two_tick_bars_drop_trailing_tick() {
    let ticks = build_ticks(&[(0, 10.0, 1), (1_000, 11.0, 5), (2_000, 13.0, 3), (1_000, 9.0, 2), (5_000, 12.0, 3)]);
    let bars = tick_bars(&ticks, 2);

    assert_eq!(
        bars,
        vec![
            Bar::new(ticks[1].timestamp, 10.0, 11.0, 10.0, 11.0),
            Bar::new(ticks[3].timestamp, 13.0, 13.0, 9.0, 9.0),
        ]
    );
}

#[test]
fn volume_residual_carries_into_next_bar() {
    let ticks = build_ticks(&[(0, 10.0, 2), (1_000, 11.0, 5), (2_000, 13.0, 3)]);
    let bars = volume_bars(&ticks, VolumeThreshold::new(3.0).unwrap());

    assert_eq!(
        bars,
        vec![
            Bar::new(ticks[1].timestamp, 10.0, 11.0, 10.0, 11.0),
            Bar::new(ticks[1].timestamp, 11.0, 11.0, 11.0, 11.0),
            Bar::new(ticks[2].timestamp, 11.0, 13.0, 11.0, 13.0),
        ]
    );
}
