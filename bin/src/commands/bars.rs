//! Bar building commands.
//!
//! The `tick`, `time` and `volume` subcommands differ only in the bar
//! bar policy they hand to the aggregator.

use crate::display::{default_output_path, load_ticks, resolve_format, write_bars};
use crate::{InputArgs, OutputArgs};
use anyhow::Result;
use tickbars_lib::prelude::*;
use tracing::{info, warn};

/// Loads ticks, builds bars for `spec` and writes them out.
pub(crate) fn build_bars(
    input: &InputArgs,
    output: &OutputArgs,
    spec: BarSpec,
    quiet: bool,
) -> Result<()> {
    if spec.is_zero() {
        warn!(%spec, "zero threshold, no bars will be built");
    }

    let ticks = load_ticks(input)?;
    info!(path = %input.path.display(), ticks = ticks.len(), "loaded ticks");

    let bars = aggregate(&ticks, &spec);
    let gaps = bars.iter().filter(|bar| bar.is_gap()).count();

    let format = resolve_format(output);
    let path = output
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&input.path, spec.kind(), format));
    write_bars(&bars, &path, format)?;
    info!(path = %path.display(), bars = bars.len(), gaps, "wrote bars");

    if !quiet {
        if gaps > 0 {
            println!(
                "Built {} {spec} bars ({gaps} gap) from {} ticks",
                bars.len(),
                ticks.len()
            );
        } else {
            println!("Built {} {spec} bars from {} ticks", bars.len(), ticks.len());
        }
        println!("Output written to: {}", path.display());
    }

    Ok(())
}
