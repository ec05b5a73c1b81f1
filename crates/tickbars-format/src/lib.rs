//! Tick loading and bar output formats for tickbars.
//!
//! This crate provides:
//!
//! - [`TickReader`] - Loads ordered ticks from CSV files
//! - [`CsvFormatter`] - CSV/TSV bar output
//! - [`JsonFormatter`] - JSON array or NDJSON bar output
//! - [`ParquetFormatter`] - Apache Parquet columnar bar output

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::{CsvFormatter, CsvTimestamp};
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::TickReader;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
