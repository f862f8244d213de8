//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur while validating user input or constructing value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // State errors
    InvalidStateTransition,
    IncompleteSession,

    // Authorization errors
    Unauthorized,

    // Calendar errors
    CalendarUnavailable,
    NoAvailability,
    BookingFailed,

    // Infrastructure errors
    TransportError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::IncompleteSession => "INCOMPLETE_SESSION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::CalendarUnavailable => "CALENDAR_UNAVAILABLE",
            ErrorCode::NoAvailability => "NO_AVAILABILITY",
            ErrorCode::BookingFailed => "BOOKING_FAILED",
            ErrorCode::TransportError => "TRANSPORT_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl From<&ValidationError> for ErrorCode {
    fn from(err: &ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("subject");
        assert_eq!(format!("{}", err), "Field 'subject' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("slot", 1, 3, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'slot' must be between 1 and 3, got 7"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("attendees", "missing @ symbol");
        assert_eq!(
            format!("{}", err),
            "Field 'attendees' has invalid format: missing @ symbol"
        );
    }

    #[test]
    fn field_returns_the_failing_field_name() {
        assert_eq!(ValidationError::empty_field("date").field(), "date");
        assert_eq!(ValidationError::out_of_range("slot", 1, 2, 3).field(), "slot");
        assert_eq!(ValidationError::invalid_format("duration", "x").field(), "duration");
    }

    #[test]
    fn error_code_maps_from_validation_error() {
        assert_eq!(
            ErrorCode::from(&ValidationError::empty_field("x")),
            ErrorCode::EmptyField
        );
        assert_eq!(
            ErrorCode::from(&ValidationError::out_of_range("x", 0, 1, 2)),
            ErrorCode::OutOfRange
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::NoAvailability), "NO_AVAILABILITY");
        assert_eq!(format!("{}", ErrorCode::BookingFailed), "BOOKING_FAILED");
    }
}
