//! tickbars CLI - build OHLC bars from trade ticks.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickbars_lib::{BarInterval, BarSpec, TimeUnit, VolumeThreshold};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Debug, Parser)]
#[command(name = "tickbars")]
#[command(about = "Build tick, time and volume OHLC bars from trade data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only errors, no summary)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Close a bar every N ticks
    Tick {
        /// Number of ticks per bar
        #[arg(short = 'n', long)]
        threshold: u64,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Close bars on fixed time boundaries anchored at the first tick
    Time {
        /// Interval length, in --unit
        #[arg(short = 'n', long)]
        interval: u64,

        /// Interval unit (ns, us, ms, s, min, h, d, w)
        #[arg(short, long, default_value = "min")]
        unit: TimeUnit,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Close a bar each time cumulative volume reaches a threshold
    Volume {
        /// Volume per bar
        #[arg(short = 'n', long)]
        threshold: f64,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Summarize a tick file without building bars
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Where and how to read ticks.
#[derive(Args, Debug, Clone)]
pub(crate) struct InputArgs {
    /// Tick file (CSV)
    pub(crate) path: PathBuf,

    /// First row is a header
    #[arg(long)]
    pub(crate) header: bool,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    pub(crate) delimiter: char,

    /// Timestamp column (0-based)
    #[arg(long, default_value = "0")]
    pub(crate) timestamp_col: usize,

    /// Price column (0-based)
    #[arg(long, default_value = "1")]
    pub(crate) price_col: usize,

    /// Volume column (0-based)
    #[arg(long, default_value = "2", conflicts_with = "no_volume")]
    pub(crate) volume_col: usize,

    /// Input has no volume column; every tick gets zero volume
    #[arg(long)]
    pub(crate) no_volume: bool,
}

/// Where and how to write bars.
#[derive(Args, Debug, Clone)]
pub(crate) struct OutputArgs {
    /// Output file path. Defaults to <input>_<mode>.<format>
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Output format. Defaults to the --output extension, else csv
    #[arg(short, long, value_enum)]
    pub(crate) format: Option<Format>,
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Tick {
            threshold,
            input,
            output,
        } => commands::bars::build_bars(&input, &output, BarSpec::Tick(threshold), cli.quiet),
        Commands::Time {
            interval,
            unit,
            input,
            output,
        } => {
            let spec = BarSpec::Time(BarInterval::new(interval, unit)?);
            commands::bars::build_bars(&input, &output, spec, cli.quiet)
        }
        Commands::Volume {
            threshold,
            input,
            output,
        } => {
            let spec = BarSpec::Volume(VolumeThreshold::new(threshold)?);
            commands::bars::build_bars(&input, &output, spec, cli.quiet)
        }
        Commands::Inspect { input } => commands::inspect::inspect(&input),
    }
}
