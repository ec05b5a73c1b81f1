//! CSV tick loading.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tickbars_types::Tick;
use tracing::debug;

use crate::FormatError;

/// Naive timestamp layouts accepted besides RFC 3339. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Reads ordered trade ticks from delimited text.
///
/// By default rows have no header and hold the timestamp, price and volume
/// in columns 0, 1 and 2. Further columns (exchange codes, trade conditions)
/// are ignored.
#[derive(Debug, Clone)]
pub struct TickReader {
    has_header: bool,
    delimiter: u8,
    timestamp_column: usize,
    price_column: usize,
    volume_column: Option<usize>,
}

impl Default for TickReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TickReader {
    /// Creates a reader for headerless `timestamp,price,volume` rows.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            has_header: false,
            delimiter: b',',
            timestamp_column: 0,
            price_column: 1,
            volume_column: Some(2),
        }
    }

    /// Sets whether the first row is a header to skip.
    #[must_use]
    pub const fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the 0-based column indices of timestamp, price and volume.
    ///
    /// Without a volume column every tick gets zero volume.
    #[must_use]
    pub const fn with_columns(mut self, timestamp: usize, price: usize, volume: Option<usize>) -> Self {
        self.timestamp_column = timestamp;
        self.price_column = price;
        self.volume_column = volume;
        self
    }

    /// Reads ticks from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or any row is invalid.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<Tick>, FormatError> {
        let path = path.as_ref();
        let ticks = self.read(File::open(path)?)?;
        debug!(path = %path.display(), ticks = ticks.len(), "loaded ticks");
        Ok(ticks)
    }

    /// Reads ticks from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed rows, unparsable fields, negative or
    /// non-finite prices and volumes, and timestamps that go backwards.
    pub fn read<R: Read>(&self, input: R) -> Result<Vec<Tick>, FormatError> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(::csv::Trim::All)
            .from_reader(input);

        let mut ticks: Vec<Tick> = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, ::csv::Position::line);

            let field = |column: usize| {
                record
                    .get(column)
                    .ok_or(FormatError::MissingField { line, column })
            };

            let raw = field(self.timestamp_column)?;
            let timestamp =
                parse_timestamp(raw).ok_or_else(|| invalid(line, "timestamp", raw))?;
            let raw = field(self.price_column)?;
            let price = parse_amount(raw).ok_or_else(|| invalid(line, "price", raw))?;
            let volume = match self.volume_column {
                Some(column) => {
                    let raw = field(column)?;
                    parse_amount(raw).ok_or_else(|| invalid(line, "volume", raw))?
                }
                None => 0.0,
            };

            if let Some(previous) = ticks.last().map(|tick| tick.timestamp)
                && timestamp < previous
            {
                return Err(FormatError::OutOfOrder {
                    line,
                    timestamp,
                    previous,
                });
            }

            ticks.push(Tick::new(timestamp, price, volume));
        }

        Ok(ticks)
    }
}

fn invalid(line: u64, field: &'static str, value: &str) -> FormatError {
    FormatError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}

/// Parses RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]` or a
/// bare date. Naive values are taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Parses a finite, non-negative number.
fn parse_amount(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use std::io::Write;

    const MOCK: &str = "\
2023-05-12 04:00:00.017479,116.57,90,8,E-B
2023-05-12 04:00:00.027445,116.65,2,7,E-B
2023-05-12 04:00:00.126033,116.57,7,8,E-B-M
2023-05-12 04:00:00.126723,116.69,7,7,E-B
2023-05-12 04:00:03.084786,116.69,2,7,E-B
";

    #[test]
    fn test_read_headerless_with_extra_columns() {
        let ticks = TickReader::new().read(MOCK.as_bytes()).unwrap();

        assert_eq!(ticks.len(), 5);
        let start = Utc.with_ymd_and_hms(2023, 5, 12, 4, 0, 0).unwrap();
        assert_eq!(ticks[0].timestamp, start + TimeDelta::microseconds(17_479));
        assert!((ticks[0].price - 116.57).abs() < 1e-10);
        assert!((ticks[0].volume - 90.0).abs() < 1e-10);
        assert_eq!(ticks[4].timestamp, start + TimeDelta::microseconds(3_084_786));
    }

    #[test]
    fn test_read_with_header_and_custom_columns() {
        let input = "volume;price;time\n5;11;2023-08-29T00:00:01Z\n3;13;2023-08-29T00:00:03Z\n";
        let ticks = TickReader::new()
            .with_header(true)
            .with_delimiter(b';')
            .with_columns(2, 1, Some(0))
            .read(input.as_bytes())
            .unwrap();

        assert_eq!(ticks.len(), 2);
        assert_eq!(
            ticks[1],
            Tick::new(Utc.with_ymd_and_hms(2023, 8, 29, 0, 0, 3).unwrap(), 13.0, 3.0)
        );
    }

    #[test]
    fn test_read_without_volume() {
        let input = "2023-08-29 00:00:00,10\n2023-08-29 00:00:01,11\n";
        let ticks = TickReader::new()
            .with_columns(0, 1, None)
            .read(input.as_bytes())
            .unwrap();
        assert!(ticks.iter().all(|tick| tick.volume == 0.0));
    }

    #[test]
    fn test_bare_date_is_midnight() {
        let ticks = TickReader::new().read("2023-08-29,10,1\n".as_bytes()).unwrap();
        assert_eq!(ticks[0].timestamp, Utc.with_ymd_and_hms(2023, 8, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_invalid_price_reports_line() {
        let input = "2023-08-29 00:00:00,10,1\n2023-08-29 00:00:01,abc,1\n";
        let err = TickReader::new().read(input.as_bytes()).unwrap_err();
        match err {
            FormatError::InvalidField { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_volume_rejected() {
        let err = TickReader::new()
            .read("2023-08-29 00:00:00,10,-1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, FormatError::InvalidField { field: "volume", .. }));
    }

    #[test]
    fn test_missing_column() {
        let err = TickReader::new()
            .read("2023-08-29 00:00:00,10\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingField { line: 1, column: 2 }));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let input = "2023-08-29 00:00:05,10,1\n2023-08-29 00:00:01,11,1\n";
        let err = TickReader::new().read(input.as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::OutOfOrder { line: 2, .. }));
    }

    #[test]
    fn test_read_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MOCK.as_bytes()).unwrap();

        let ticks = TickReader::new().read_path(file.path()).unwrap();
        assert_eq!(ticks.len(), 5);
    }

    #[test]
    fn test_missing_file() {
        let err = TickReader::new().read_path("/nonexistent/ticks.csv").unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
