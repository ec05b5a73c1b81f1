//! Tick, time and volume OHLC bars from trade ticks.
//!
//! This is a facade crate that re-exports functionality from the tickbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use tickbars_lib::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let t0 = Utc.with_ymd_and_hms(2023, 8, 29, 0, 0, 0).unwrap();
//! let ticks = vec![
//!     Tick::new(t0, 10.0, 1.0),
//!     Tick::new(t0 + chrono::TimeDelta::seconds(1), 11.0, 5.0),
//! ];
//!
//! let spec: BarSpec = "tick:2".parse().unwrap();
//! let bars = aggregate(&ticks, &spec);
//! assert_eq!(bars.len(), 1);
//! assert_eq!(bars[0].high, 11.0);
//! ```

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbars_types::*;

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use tickbars_aggregate::{
    Accumulator, Aggregator, BarAggregator, Ohlc, TickBarAggregator, TimeBarAggregator,
    VolumeBarAggregator, aggregate, tick_bars, time_bars, volume_bars,
};

// Re-export loading and formatters
#[cfg(feature = "format")]
pub use tickbars_format::{
    CsvFormatter, CsvTimestamp, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
    TickReader,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use tickbars_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use tickbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbars_types::{
        Bar, BarInterval, BarSpec, Result, Tick, TickbarsError, TimeUnit, VolumeThreshold,
    };

    #[cfg(feature = "aggregate")]
    pub use tickbars_aggregate::{BarAggregator, aggregate};

    #[cfg(feature = "format")]
    pub use tickbars_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, TickReader};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use tickbars_format::ParquetFormatter;
}
