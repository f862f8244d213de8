//! Application layer - handlers and the conversation runner.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod conversation_runner;
pub mod handlers;

pub use conversation_runner::{ConversationRunner, RunnerError};
pub use handlers::{
    BookMeetingHandler, BookMeetingResult, EventTemplate, MeetingDialog,
    SuggestMeetingTimesHandler, SuggestMeetingTimesResult, SuggestionPolicy, TurnOutcome,
};
