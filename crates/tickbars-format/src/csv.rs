//! Delimited text output format.

use std::io::Write;
use tickbars_types::Bar;

use crate::{FormatError, Formatter};

const RFC3339_UTC: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// How bar timestamps are rendered in CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsvTimestamp {
    /// RFC 3339 in UTC with only as many fractional digits as needed.
    #[default]
    Rfc3339,
    /// Integer milliseconds since the Unix epoch.
    EpochMillis,
    /// Integer nanoseconds since the Unix epoch.
    EpochNanos,
}

/// CSV/TSV bar formatter.
///
/// Writes `timestamp,open,high,low,close` rows. Gap bar prices are written
/// as the configured gap value, an empty field by default.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    delimiter: char,
    include_header: bool,
    timestamp: CsvTimestamp,
    gap_value: String,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Comma-separated with a header row and RFC 3339 timestamps.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
            timestamp: CsvTimestamp::Rfc3339,
            gap_value: String::new(),
        }
    }

    /// Tab-separated variant of [`new`](Self::new).
    #[must_use]
    pub const fn tsv() -> Self {
        Self::new().with_delimiter('\t')
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to write a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets the timestamp rendering.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: CsvTimestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the text written in place of gap prices, e.g. `NaN`.
    #[must_use]
    pub fn with_gap_value(mut self, value: impl Into<String>) -> Self {
        self.gap_value = value.into();
        self
    }

    fn write_timestamp<W: Write>(&self, bar: &Bar, writer: &mut W) -> Result<(), FormatError> {
        match self.timestamp {
            CsvTimestamp::Rfc3339 => write!(writer, "{}", bar.timestamp.format(RFC3339_UTC))?,
            CsvTimestamp::EpochMillis => write!(writer, "{}", bar.timestamp.timestamp_millis())?,
            CsvTimestamp::EpochNanos => {
                let nanos = bar.timestamp.timestamp_nanos_opt().ok_or_else(|| {
                    FormatError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("timestamp {} out of nanosecond range", bar.timestamp),
                    ))
                })?;
                write!(writer, "{nanos}")?;
            }
        }
        Ok(())
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "timestamp{d}open{d}high{d}low{d}close")?;
        }

        for bar in bars {
            self.write_timestamp(bar, &mut writer)?;
            if bar.is_gap() {
                let gap = &self.gap_value;
                writeln!(writer, "{d}{gap}{d}{gap}{d}{gap}{d}{gap}")?;
            } else {
                writeln!(
                    writer,
                    "{d}{}{d}{}{d}{}{d}{}",
                    bar.open, bar.high, bar.low, bar.close
                )?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
