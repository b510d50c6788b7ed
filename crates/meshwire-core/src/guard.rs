//! Construction-time precondition guards.
//!
//! Every entity constructor funnels its required and range-constrained
//! fields through these helpers. Checks run exactly once, synchronously,
//! at construction; on success the value passes through unchanged.

use crate::error::WireError;

/// Return the value, or fail when the required field is absent.
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T, WireError> {
    value.ok_or(WireError::MissingRequiredField { field })
}

/// Return the string, or fail when a required string field is empty.
///
/// The wire contract treats an empty required string the same as an
/// absent one.
pub fn require_nonempty(value: String, field: &'static str) -> Result<String, WireError> {
    if value.is_empty() {
        return Err(WireError::MissingRequiredField { field });
    }

    Ok(value)
}

/// Return the value, or fail when it lies outside the inclusive bounds.
pub const fn require_in_range(
    value: i64,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, WireError> {
    if value < min || value > max {
        return Err(WireError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(value)
}

///
/// TESTS
///
