//! Error types for caller-supplied configuration.
//!
//! Card data itself never produces errors: malformed numbers, dates and CVCs
//! are ordinary `false` verdicts. The errors here cover the values a
//! composition root hands to the engine, such as the reference date.

use std::fmt;

/// Errors that can occur while building a [`ReferenceDate`](crate::ReferenceDate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The input string was empty.
    Empty,

    /// The input did not look like `YYYY-MM` or `YYYY/MM`.
    InvalidFormat,

    /// The month was outside 1-12.
    InvalidMonth(i32),

    /// The year was negative or above 9999.
    InvalidYear(i32),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "reference date is empty"),
            Self::InvalidFormat => {
                write!(f, "invalid reference date format (expected YYYY-MM)")
            }
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::InvalidYear(y) => write!(f, "invalid year {}: must be 0-9999", y),
        }
    }
}

impl std::error::Error for DateError {}
