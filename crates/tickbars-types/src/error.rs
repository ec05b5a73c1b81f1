//! Error types for tickbars.

use thiserror::Error;

use crate::TimeUnitParseError;

/// Result type alias for tickbars operations.
pub type Result<T> = std::result::Result<T, TickbarsError>;

/// Errors raised while building bar configuration.
///
/// Aggregation itself cannot fail; every invalid threshold is rejected when
/// the threshold value is constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickbarsError {
    /// Threshold is negative, not finite, or too large to represent.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Unknown time unit.
    #[error(transparent)]
    TimeUnit(#[from] TimeUnitParseError),

    /// Malformed bar specification string.
    #[error("Invalid bar spec '{0}', expected tick:<count>, time:<interval> or volume:<quantity>")]
    InvalidSpec(String),
}
