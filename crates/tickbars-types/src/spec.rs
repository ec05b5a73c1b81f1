//! Bar construction policies and their thresholds.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Result, TickbarsError, TimeUnit};

/// Fixed time span used by time bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct BarInterval {
    magnitude: u64,
    unit: TimeUnit,
    delta: TimeDelta,
}

/// Serialized form of [`BarInterval`], validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawInterval {
    magnitude: u64,
    unit: TimeUnit,
}

impl TryFrom<RawInterval> for BarInterval {
    type Error = TickbarsError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.magnitude, raw.unit)
    }
}

impl From<BarInterval> for RawInterval {
    fn from(interval: BarInterval) -> Self {
        Self {
            magnitude: interval.magnitude,
            unit: interval.unit,
        }
    }
}

impl BarInterval {
    /// Creates an interval of `magnitude` units.
    ///
    /// # Errors
    ///
    /// Returns [`TickbarsError::InvalidThreshold`] if the span does not fit
    /// in a [`TimeDelta`].
    pub fn new(magnitude: u64, unit: TimeUnit) -> Result<Self> {
        let delta = unit.delta(magnitude).ok_or_else(|| {
            TickbarsError::InvalidThreshold(format!("{magnitude} {unit} overflows a time span"))
        })?;
        Ok(Self {
            magnitude,
            unit,
            delta,
        })
    }

    /// Returns the number of units.
    #[must_use]
    pub const fn magnitude(&self) -> u64 {
        self.magnitude
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the span as a [`TimeDelta`].
    #[must_use]
    pub const fn as_delta(&self) -> TimeDelta {
        self.delta
    }

    /// Returns true for a zero-length interval.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.magnitude == 0
    }
}

impl std::fmt::Display for BarInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

impl FromStr for BarInterval {
    type Err = TickbarsError;

    /// Parses `30min`, `30 minutes`, `10ms`. A bare number is minutes.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        let magnitude = digits
            .parse::<u64>()
            .map_err(|_| TickbarsError::InvalidThreshold(format!("invalid interval '{s}'")))?;
        let unit = if unit.trim().is_empty() {
            TimeUnit::default()
        } else {
            unit.parse()?
        };
        Self::new(magnitude, unit)
    }
}

/// Volume quantum used by volume bars.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VolumeThreshold(f64);

impl VolumeThreshold {
    /// Creates a volume threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TickbarsError::InvalidThreshold`] if `volume` is negative,
    /// NaN, or infinite.
    pub fn new(volume: f64) -> Result<Self> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(TickbarsError::InvalidThreshold(format!(
                "volume threshold must be a finite non-negative number, got {volume}"
            )));
        }
        Ok(Self(volume))
    }

    /// Returns the threshold value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns true for a zero threshold.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<f64> for VolumeThreshold {
    type Error = TickbarsError;

    fn try_from(volume: f64) -> Result<Self> {
        Self::new(volume)
    }
}

impl From<VolumeThreshold> for f64 {
    fn from(threshold: VolumeThreshold) -> Self {
        threshold.0
    }
}

impl std::fmt::Display for VolumeThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How ticks are grouped into bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "threshold")]
pub enum BarSpec {
    /// Close a bar every N ticks.
    Tick(u64),
    /// Close bars on fixed time boundaries anchored at the first tick.
    Time(BarInterval),
    /// Close a bar each time cumulative volume reaches the threshold.
    Volume(VolumeThreshold),
}

impl BarSpec {
    /// Returns the policy name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Tick(_) => "tick",
            Self::Time(_) => "time",
            Self::Volume(_) => "volume",
        }
    }

    /// Returns true if the threshold is zero, in which case no bars are built.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Tick(count) => *count == 0,
            Self::Time(interval) => interval.is_zero(),
            Self::Volume(threshold) => threshold.is_zero(),
        }
    }
}

impl std::fmt::Display for BarSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tick(count) => write!(f, "tick:{count}"),
            Self::Time(interval) => write!(f, "time:{interval}"),
            Self::Volume(threshold) => write!(f, "volume:{threshold}"),
        }
    }
}

impl FromStr for BarSpec {
    type Err = TickbarsError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, threshold) = s
            .split_once(':')
            .ok_or_else(|| TickbarsError::InvalidSpec(s.to_string()))?;
        let threshold = threshold.trim();

        match kind.trim().to_lowercase().as_str() {
            "tick" | "ticks" => threshold
                .parse::<u64>()
                .map(Self::Tick)
                .map_err(|_| TickbarsError::InvalidThreshold(format!("invalid tick count '{threshold}'"))),
            "time" => threshold.parse().map(Self::Time),
            "volume" | "vol" => {
                let volume = threshold.parse::<f64>().map_err(|_| {
                    TickbarsError::InvalidThreshold(format!("invalid volume '{threshold}'"))
                })?;
                VolumeThreshold::new(volume).map(Self::Volume)
            }
            _ => Err(TickbarsError::InvalidSpec(s.to_string())),
        }
    }
}
