//! Display utilities and output formatting for the tickbars CLI.

#[cfg(not(feature = "parquet"))]
use anyhow::bail;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tickbars_lib::prelude::*;

use crate::{InputArgs, OutputArgs};

/// Output format for bar files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => Self::Csv,
            OutputFormat::Json => Self::Json,
            OutputFormat::Ndjson => Self::Ndjson,
            OutputFormat::Parquet => Self::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Builds a tick reader from the input flags.
pub(crate) fn tick_reader(input: &InputArgs) -> Result<TickReader> {
    let delimiter = u8::try_from(input.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be a single ASCII character: {:?}", input.delimiter))?;
    let volume = (!input.no_volume).then_some(input.volume_col);

    Ok(TickReader::new()
        .with_header(input.header)
        .with_delimiter(delimiter)
        .with_columns(input.timestamp_col, input.price_col, volume))
}

/// Loads ticks from the input file.
pub(crate) fn load_ticks(input: &InputArgs) -> Result<Vec<Tick>> {
    tick_reader(input)?
        .read_path(&input.path)
        .with_context(|| format!("Failed to read ticks from {}", input.path.display()))
}

/// Picks the output format: `-f` first, then the `-o` extension, then CSV.
pub(crate) fn resolve_format(output: &OutputArgs) -> Format {
    output
        .format
        .or_else(|| {
            output
                .output
                .as_deref()
                .and_then(OutputFormat::from_path)
                .map(Format::from)
        })
        .unwrap_or(Format::Csv)
}

/// Default output path: `<input stem>_<mode>.<ext>` next to the input.
pub(crate) fn default_output_path(input: &Path, mode: &str, format: Format) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "ticks".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_{mode}.{}", format.extension()))
}

/// Write bars to a file in the specified format.
pub(crate) fn write_bars(bars: &[Bar], output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => CsvFormatter::new().write_bars(bars, writer)?,
        Format::Json => JsonFormatter::new().write_bars(bars, writer)?,
        Format::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer)?,
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                ParquetFormatter::new().write_bars(bars, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                drop(writer);
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}
