//! OHLC bar aggregation for tickbars.
//!
//! This crate turns an ordered tick sequence into OHLC bars:
//!
//! - [`Accumulator`] - OHLC state of the bar being built
//! - [`TickBarAggregator`] - One bar every N ticks
//! - [`TimeBarAggregator`] - One bar per fixed time interval, with gap bars
//! - [`VolumeBarAggregator`] - One bar per volume quantum
//! - [`aggregate`] - Batch entry point selecting the policy from a [`BarSpec`]
//!
//! [`BarSpec`]: tickbars_types::BarSpec

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod aggregator;
mod tick_count;
mod time_interval;
mod volume;

pub use accumulator::{Accumulator, Ohlc};
pub use aggregator::{Aggregator, BarAggregator, aggregate, tick_bars, time_bars, volume_bars};
pub use tick_count::TickBarAggregator;
pub use time_interval::TimeBarAggregator;
pub use volume::{DEFAULT_MAX_SPLIT, VolumeBarAggregator};
