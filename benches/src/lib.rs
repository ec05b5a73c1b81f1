//! Benchmark fixtures for tickbars.

use chrono::{TimeDelta, TimeZone, Utc};
use tickbars_types::Tick;

/// Generates `count` ordered ticks shaped like a liquid equity session.
///
/// Prices follow a bounded deterministic walk around 100. Inter-arrival
/// times cycle between 1ms and a few seconds so that time bars see both
/// dense intervals and empty ones. Volumes cycle through round lots.
#[must_use]
pub fn synthetic_ticks(count: usize) -> Vec<Tick> {
    let start = Utc.with_ymd_and_hms(2023, 5, 12, 13, 30, 0).single().unwrap_or_default();
    let mut timestamp = start;
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;

    (0..count)
        .map(|i| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;

            let step = i64::try_from(state % 2_500).unwrap_or(0) + 1;
            if i > 0 {
                timestamp += TimeDelta::milliseconds(step);
            }
            let offset = (state % 2_001) as f64 / 100.0 - 10.0;
            let volume = [1.0, 5.0, 10.0, 100.0, 300.0][(state % 5) as usize];
            Tick::new(timestamp, 100.0 + offset, volume)
        })
        .collect()
}

/// CSV text for `ticks`, as read by the default tick reader.
#[must_use]
pub fn ticks_csv(ticks: &[Tick]) -> String {
    ticks
        .iter()
        .map(|tick| {
            format!(
                "{},{},{}\n",
                tick.timestamp.format("%Y-%m-%d %H:%M:%S%.6f"),
                tick.price,
                tick.volume
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_ticks_are_ordered() {
        let ticks = synthetic_ticks(1_000);
        assert_eq!(ticks.len(), 1_000);
        assert!(ticks.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert!(ticks.iter().all(|t| (90.0..=110.0).contains(&t.price)));
    }

    #[test]
    fn test_synthetic_ticks_are_deterministic() {
        assert_eq!(synthetic_ticks(100), synthetic_ticks(100));
    }
}
