//! Time units for time-bar intervals.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit of a [`BarInterval`](crate::BarInterval) magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds.
    #[serde(rename = "ns")]
    Nanoseconds,
    /// Microseconds.
    #[serde(rename = "us")]
    Microseconds,
    /// Milliseconds.
    #[serde(rename = "ms")]
    Milliseconds,
    /// Seconds.
    #[serde(rename = "s")]
    Seconds,
    /// Minutes.
    #[default]
    #[serde(rename = "min")]
    Minutes,
    /// Hours.
    #[serde(rename = "h")]
    Hours,
    /// Days (fixed 24 hours).
    #[serde(rename = "d")]
    Days,
    /// Weeks (fixed 7 days).
    #[serde(rename = "w")]
    Weeks,
}

impl TimeUnit {
    /// Returns the length of one unit in nanoseconds.
    #[must_use]
    pub const fn nanoseconds(&self) -> i64 {
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60 * 1_000_000_000,
            Self::Hours => 3_600 * 1_000_000_000,
            Self::Days => 86_400 * 1_000_000_000,
            Self::Weeks => 604_800 * 1_000_000_000,
        }
    }

    /// Returns `magnitude` units as a [`TimeDelta`], or `None` on overflow.
    #[must_use]
    pub fn delta(&self, magnitude: u64) -> Option<TimeDelta> {
        let magnitude = i64::try_from(magnitude).ok()?;
        magnitude
            .checked_mul(self.nanoseconds())
            .map(TimeDelta::nanoseconds)
    }

    /// Returns the unit as a short string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "us",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
        }
    }

    /// Returns all available units.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Nanoseconds,
            Self::Microseconds,
            Self::Milliseconds,
            Self::Seconds,
            Self::Minutes,
            Self::Hours,
            Self::Days,
            Self::Weeks,
        ]
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeUnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => Ok(Self::Nanoseconds),
            "us" | "micro" | "micros" | "microsecond" | "microseconds" => Ok(Self::Microseconds),
            "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => Ok(Self::Milliseconds),
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(Self::Seconds),
            "m" | "min" | "mins" | "minute" | "minutes" | "t" => Ok(Self::Minutes),
            "h" | "hr" | "hour" | "hours" => Ok(Self::Hours),
            "d" | "day" | "days" => Ok(Self::Days),
            "w" | "week" | "weeks" => Ok(Self::Weeks),
            _ => Err(TimeUnitParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid time unit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeUnitParseError(String);

impl std::fmt::Display for TimeUnitParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid time unit '{}', expected one of: ns, us, ms, s, min, h, d, w",
            self.0
        )
    }
}

impl std::error::Error for TimeUnitParseError {}
