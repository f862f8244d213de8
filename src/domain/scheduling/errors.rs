//! Scheduling error types.
//!
//! Three failure classes, by how far they travel:
//! - validation failures never leave the dialog (the stage re-prompts),
//! - `SuggestionError` sends the dialog back to the date stage,
//! - `BookingError` ends the conversation and is returned to the caller.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::ports::CalendarError;

/// Recoverable failure while fetching candidate slots.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// A field the query needs has not been collected yet.
    #[error("session is missing '{0}'")]
    IncompleteSession(&'static str),

    /// The calendar service failed or timed out.
    #[error("availability lookup failed: {0}")]
    Calendar(#[from] CalendarError),

    /// The service answered but no candidate survived parsing.
    #[error("no available slots")]
    NoAvailability,
}

impl SuggestionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SuggestionError::IncompleteSession(_) => ErrorCode::IncompleteSession,
            SuggestionError::Calendar(_) => ErrorCode::CalendarUnavailable,
            SuggestionError::NoAvailability => ErrorCode::NoAvailability,
        }
    }
}

/// Terminal failure while creating the calendar event.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A field the event needs has not been collected yet.
    #[error("session is missing '{0}'")]
    IncompleteSession(&'static str),

    /// The chosen slot does not exist.
    #[error("invalid slot choice: {0}")]
    InvalidSlot(#[from] ValidationError),

    /// The calendar service rejected or failed the create call.
    #[error("event creation failed: {0}")]
    Calendar(#[from] CalendarError),
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::IncompleteSession(_) => ErrorCode::IncompleteSession,
            BookingError::InvalidSlot(err) => ErrorCode::from(err),
            BookingError::Calendar(_) => ErrorCode::BookingFailed,
        }
    }
}

/// Errors that escape a conversation turn.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Booking failed; the session is now in its failed stage.
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// A handler tried to move the session along an edge that does not exist.
    #[error("invalid stage transition: {0}")]
    InvalidTransition(ValidationError),
}

impl SchedulingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SchedulingError::Booking(err) => err.code(),
            SchedulingError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_codes() {
        assert_eq!(SuggestionError::NoAvailability.code(), ErrorCode::NoAvailability);
        assert_eq!(
            SuggestionError::from(CalendarError::AuthExpired).code(),
            ErrorCode::CalendarUnavailable
        );
        assert_eq!(
            SuggestionError::IncompleteSession("date").code(),
            ErrorCode::IncompleteSession
        );
    }

    #[test]
    fn booking_error_propagates_through_scheduling_error() {
        let err: SchedulingError = BookingError::from(CalendarError::unavailable("503")).into();
        assert_eq!(err.code(), ErrorCode::BookingFailed);
        assert!(err.to_string().contains("event creation failed"));
    }

    #[test]
    fn invalid_slot_keeps_validation_code() {
        let err = BookingError::from(ValidationError::out_of_range("slot", 1, 2, 5));
        assert_eq!(err.code(), ErrorCode::OutOfRange);
    }
}
