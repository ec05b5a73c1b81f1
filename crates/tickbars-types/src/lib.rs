//! Core types for the tickbars OHLC bar builder.
//!
//! This crate provides the fundamental data structures used throughout tickbars:
//!
//! - [`Tick`] - A single trade with timestamp, price, and volume
//! - [`Bar`] - An OHLC bar, possibly a gap bar with no observed trades
//! - [`BarSpec`] - Which aggregation policy to apply and its threshold
//! - [`BarInterval`] / [`TimeUnit`] - Fixed time span for time bars
//! - [`VolumeThreshold`] - Volume quantum for volume bars

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod spec;
mod tick;
mod time_unit;

pub use bar::Bar;
pub use error::{Result, TickbarsError};
pub use spec::{BarInterval, BarSpec, VolumeThreshold};
pub use tick::Tick;
pub use time_unit::{TimeUnit, TimeUnitParseError};
