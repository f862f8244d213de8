//! Scheduling handlers.
//!
//! - `suggest_meeting_times` - availability search for the requested day
//! - `book_meeting` - event creation for the chosen slot
//! - `dialog` - per-turn dispatch over the dialog stages

mod book_meeting;
mod dialog;
mod suggest_meeting_times;

pub use book_meeting::{BookMeetingHandler, BookMeetingResult, EventTemplate};
pub use dialog::{MeetingDialog, TurnOutcome};
pub use suggest_meeting_times::{
    SuggestMeetingTimesHandler, SuggestMeetingTimesResult, SuggestionPolicy,
};

use std::future::Future;
use std::time::Duration;

use crate::ports::CalendarError;

/// Bounds a calendar call; an elapsed timer becomes `CalendarError::Timeout`
/// with the limit rounded up to whole seconds.
pub(crate) async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, CalendarError>
where
    F: Future<Output = Result<T, CalendarError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| CalendarError::Timeout {
            timeout_secs: limit.as_secs() + u64::from(limit.subsec_nanos() > 0),
        })?
}
