//! Application handlers.
//!
//! Handlers orchestrate domain operations and coordinate between ports.

pub mod scheduling;

pub use scheduling::{
    BookMeetingHandler, BookMeetingResult, EventTemplate, MeetingDialog,
    SuggestMeetingTimesHandler, SuggestMeetingTimesResult, SuggestionPolicy, TurnOutcome,
};
