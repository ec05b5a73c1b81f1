//! JSON output format.

use serde::Serialize;
use std::io::Write;
use tickbars_types::Bar;

use crate::{FormatError, Formatter};

/// Layout of a JSON bar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// One top-level array holding every bar.
    #[default]
    Array,
    /// One bar object per line (NDJSON/JSONL).
    Ndjson,
}

/// JSON bar formatter.
///
/// Gap bar prices are written as `null`. With [`with_gap_flag`] every record
/// also carries a boolean `gap` field.
///
/// [`with_gap_flag`]: JsonFormatter::with_gap_flag
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
    pretty: bool,
    gap_flag: bool,
}

/// Serialized view of a bar.
#[derive(Serialize)]
struct Record<'a> {
    #[serde(flatten)]
    bar: &'a Bar,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap: Option<bool>,
}

impl JsonFormatter {
    /// Creates an array-style formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
            gap_flag: false,
        }
    }

    /// Creates an NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self::new().with_style(JsonStyle::Ndjson)
    }

    /// Sets the output layout.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Pretty-prints array output. Ignored for NDJSON.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Adds a `gap` field to every record.
    #[must_use]
    pub const fn with_gap_flag(mut self, gap_flag: bool) -> Self {
        self.gap_flag = gap_flag;
        self
    }

    fn record<'a>(&self, bar: &'a Bar) -> Record<'a> {
        Record {
            bar,
            gap: self.gap_flag.then(|| bar.is_gap()),
        }
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let records = bars.iter().map(|bar| self.record(bar));

        match (self.style, self.pretty) {
            (JsonStyle::Ndjson, _) => {
                for record in records {
                    serde_json::to_writer(&mut writer, &record)?;
                    writer.write_all(b"\n")?;
                }
            }
            (JsonStyle::Array, pretty) => {
                let records: Vec<Record<'_>> = records.collect();
                if pretty {
                    serde_json::to_writer_pretty(&mut writer, &records)?;
                } else {
                    serde_json::to_writer(&mut writer, &records)?;
                }
                writer.write_all(b"\n")?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
