//! SuggestMeetingTimesHandler - finds candidate slots for the requested day.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::scheduling::{
    parse_service_timestamp, rank_slots, render_slot_listing, DayWindow, MeetingSession,
    SuggestionError, TimeSlot,
};
use crate::ports::{CalendarService, MeetingTimeCandidate, MeetingTimeQuery, SearchWindow};

use super::with_timeout;

/// Search parameters that do not come from the user.
///
/// Every attendee must be free in a suggested slot; that is not part of the
/// policy and cannot be relaxed.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPolicy {
    pub day_window: DayWindow,
    pub max_candidates: u32,
    pub call_timeout: Duration,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            day_window: DayWindow::default(),
            max_candidates: 15,
            call_timeout: Duration::from_secs(30),
        }
    }
}

/// Result of a successful search.
#[derive(Debug, Clone)]
pub struct SuggestMeetingTimesResult {
    /// Slots sorted by start time.
    pub slots: Vec<TimeSlot>,
    /// Numbered listing shown to the user.
    pub listing: String,
}

/// Handler for availability search.
pub struct SuggestMeetingTimesHandler {
    calendar: Arc<dyn CalendarService>,
    policy: SuggestionPolicy,
}

impl SuggestMeetingTimesHandler {
    pub fn new(calendar: Arc<dyn CalendarService>, policy: SuggestionPolicy) -> Self {
        Self { calendar, policy }
    }

    pub async fn handle(
        &self,
        session: &MeetingSession,
    ) -> Result<SuggestMeetingTimesResult, SuggestionError> {
        // 1. Build the query from the session
        let query = self.build_query(session)?;

        // 2. Ask the calendar, bounded by the call timeout
        let candidates = with_timeout(
            self.policy.call_timeout,
            self.calendar
                .find_meeting_times(session.access_token(), &query),
        )
        .await?;
        let returned = candidates.len();

        // 3. Keep the candidates we can read, earliest first
        let slots = rank_slots(candidates.iter().filter_map(candidate_to_slot).collect());
        tracing::debug!(returned, usable = slots.len(), "meeting time candidates");

        if slots.is_empty() {
            return Err(SuggestionError::NoAvailability);
        }

        let listing = render_slot_listing(&slots);
        Ok(SuggestMeetingTimesResult { slots, listing })
    }

    fn build_query(&self, session: &MeetingSession) -> Result<MeetingTimeQuery, SuggestionError> {
        let date = session
            .requested_date()
            .ok_or(SuggestionError::IncompleteSession("date"))?;
        let duration = session
            .duration_minutes()
            .ok_or(SuggestionError::IncompleteSession("duration"))?;
        if session.attendee_emails().is_empty() {
            return Err(SuggestionError::IncompleteSession("attendees"));
        }

        let day = self.policy.day_window.on(date);
        let window = SearchWindow {
            start: day.start,
            end: day.end,
        };

        Ok(
            MeetingTimeQuery::new(session.attendee_emails().to_vec(), vec![window], duration)
                .with_max_candidates(self.policy.max_candidates),
        )
    }
}

/// Parses one candidate, logging and dropping it if unreadable.
fn candidate_to_slot(candidate: &MeetingTimeCandidate) -> Option<TimeSlot> {
    let start = parse_service_timestamp(&candidate.start, &candidate.time_zone);
    let end = parse_service_timestamp(&candidate.end, &candidate.time_zone);

    match (start, end) {
        (Some(start), Some(end)) => match TimeSlot::new(start, end) {
            Ok(slot) => Some(slot),
            Err(err) => {
                tracing::warn!(error = %err, "discarding inverted meeting time candidate");
                None
            }
        },
        _ => {
            tracing::warn!(
                start = %candidate.start,
                end = %candidate.end,
                time_zone = %candidate.time_zone,
                "discarding unparsable meeting time candidate"
            );
            None
        }
    }
}
