//! Scheduling module - the meeting-booking conversation's domain.
//!
//! - `validators` - pure checks that turn raw text into typed values
//! - `stage` - the dialog stages and their allowed transitions
//! - `session` - per-conversation accumulated state
//! - `time_slot` - candidate windows, ranking and wire formatting
//! - `errors` - suggestion, booking and turn error types

mod errors;
mod session;
mod stage;
mod time_slot;
pub mod validators;

pub use errors::{BookingError, SchedulingError, SuggestionError};
pub use session::MeetingSession;
pub use stage::DialogStage;
pub use time_slot::{
    format_booking_timestamp, parse_service_timestamp, rank_slots, render_slot_listing,
    DayWindow, TimeSlot,
};
