//! Inspect command implementation.

use crate::InputArgs;
use crate::display::load_ticks;
use anyhow::Result;
use tickbars_lib::prelude::*;

/// Summary statistics of a tick file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TickSummary {
    pub(crate) count: usize,
    pub(crate) first: Tick,
    pub(crate) last: Tick,
    pub(crate) min_price: f64,
    pub(crate) max_price: f64,
    pub(crate) total_volume: f64,
}

impl TickSummary {
    /// Summarizes `ticks`, or `None` when there are none.
    pub(crate) fn from_ticks(ticks: &[Tick]) -> Option<Self> {
        let first = *ticks.first()?;
        let last = *ticks.last()?;
        let (min_price, max_price, total_volume) = ticks.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, vol), tick| (lo.min(tick.price), hi.max(tick.price), vol + tick.volume),
        );

        Some(Self {
            count: ticks.len(),
            first,
            last,
            min_price,
            max_price,
            total_volume,
        })
    }
}

/// Print a summary of the tick file.
pub(crate) fn inspect(input: &InputArgs) -> Result<()> {
    let ticks = load_ticks(input)?;

    let Some(summary) = TickSummary::from_ticks(&ticks) else {
        println!("{}: no ticks", input.path.display());
        return Ok(());
    };

    println!("File:         {}", input.path.display());
    println!("Ticks:        {}", summary.count);
    println!("First:        {}", summary.first.timestamp);
    println!("Last:         {}", summary.last.timestamp);
    println!("Span:         {}", summary.last.timestamp - summary.first.timestamp);
    println!("Price range:  {} - {}", summary.min_price, summary.max_price);
    println!("Total volume: {}", summary.total_volume);

    Ok(())
}
