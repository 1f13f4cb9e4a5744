//! Field validation shared by the table gateways.
//!
//! # Responsibility
//! - Check values against the column constraints of `users` and `logins`
//!   before any SQL runs.
//!
//! # Invariants
//! - Every check is pure and reports the offending field name.
//! - Varchar length is measured in bytes, matching `VARCHAR(255)` storage.

use chrono::{NaiveDateTime, Timelike};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum byte length of a `VARCHAR(255)` column.
pub const VARCHAR_MAX_LEN: usize = 255;
/// Inclusive upper bound of an unsigned 32-bit integer column.
pub const INT_MAX: i64 = 4_294_967_295;
/// Text layout of `DATETIME` values, e.g. `2017-10-28 07:43:08`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field value rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value is not of the column's type (non-integer text, malformed datetime).
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// Required value is blank.
    Empty { field: &'static str },
    /// Value exceeds the column width.
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    /// Integer outside `[0, INT_MAX]`.
    OutOfRange { field: &'static str, value: i64 },
}

impl ValidationError {
    /// Name of the rejected field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::WrongType { field, .. }
            | Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongType { field, expected } => {
                write!(f, "the {field} is not {expected}")
            }
            Self::Empty { field } => write!(f, "the {field} is empty"),
            Self::TooLong { field, len, max } => {
                write!(f, "the {field} is too long ({len} bytes, max {max})")
            }
            Self::OutOfRange { field, value } => write!(
                f,
                "the {field} is outside the valid numerical range: {value} not in 0..={INT_MAX}"
            ),
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Checks a value destined for a `VARCHAR(255)` column.
pub fn validate_varchar(value: &str, field: &'static str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.len() > VARCHAR_MAX_LEN {
        return Err(ValidationError::TooLong {
            field,
            len: value.len(),
            max: VARCHAR_MAX_LEN,
        });
    }
    Ok(())
}

/// Checks a value destined for an unsigned 32-bit integer column.
pub fn validate_int(value: i64, field: &'static str) -> ValidationResult<()> {
    if !(0..=INT_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(())
}

/// Parses integer text received from an outer surface (form field, query
/// string) and range-checks it.
pub fn parse_int(text: &str, field: &'static str) -> ValidationResult<i64> {
    let value = text
        .parse::<i64>()
        .map_err(|_| ValidationError::WrongType {
            field,
            expected: "an integer",
        })?;
    validate_int(value, field)?;
    Ok(value)
}

/// Checks a `YYYY-MM-DD HH:MM:SS` datetime.
///
/// The value must name a real calendar instant and must format back to the
/// exact same text, so `2017-1-5 1:2:3` and `2017-02-30 10:00:00` are both
/// rejected.
pub fn validate_datetime(value: &str, field: &'static str) -> ValidationResult<()> {
    let wrong_type = || ValidationError::WrongType {
        field,
        expected: "a datetime value",
    };

    let parsed = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| wrong_type())?;
    // chrono keeps `:60` as a leap second; the column cannot store it.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(wrong_type());
    }
    if parsed.format(DATETIME_FORMAT).to_string() != value {
        return Err(wrong_type());
    }
    Ok(())
}

/// Checks a surrogate key argument.
pub(crate) fn validate_id(id: i64) -> ValidationResult<()> {
    validate_int(id, "id")
}
