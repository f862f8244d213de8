//! BookMeetingHandler - creates the calendar event for the chosen slot.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::ValidationError;
use crate::domain::scheduling::{format_booking_timestamp, BookingError, MeetingSession, TimeSlot};
use crate::ports::{CalendarService, CreatedEvent, NewCalendarEvent};

use super::with_timeout;

/// Time zone name sent with every booking; timestamps are rendered in UTC.
const BOOKING_TIME_ZONE: &str = "UTC";

/// Fixed parts of every created event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplate {
    pub body: String,
    /// Display name of the meeting place; never blank.
    pub location: String,
}

impl Default for EventTemplate {
    fn default() -> Self {
        Self {
            body: "Scheduled by meeting-scheduler.".to_string(),
            location: "Online meeting".to_string(),
        }
    }
}

/// Result of successful booking.
#[derive(Debug, Clone)]
pub struct BookMeetingResult {
    pub event: CreatedEvent,
    pub slot: TimeSlot,
    /// Message shown to the user.
    pub confirmation: String,
}

/// Handler for booking the selected slot.
pub struct BookMeetingHandler {
    calendar: Arc<dyn CalendarService>,
    template: EventTemplate,
    call_timeout: Duration,
}

impl BookMeetingHandler {
    pub fn new(
        calendar: Arc<dyn CalendarService>,
        template: EventTemplate,
        call_timeout: Duration,
    ) -> Self {
        Self {
            calendar,
            template,
            call_timeout,
        }
    }

    /// Books `session.candidate_slots()[index]`. Issues exactly one create call.
    pub async fn handle(
        &self,
        session: &MeetingSession,
        index: usize,
    ) -> Result<BookMeetingResult, BookingError> {
        // 1. Collect what the event needs
        let subject = session
            .subject()
            .ok_or(BookingError::IncompleteSession("subject"))?;
        let duration = session
            .duration_minutes()
            .ok_or(BookingError::IncompleteSession("duration"))?;
        let attendees = session.attendee_emails();
        if attendees.is_empty() {
            return Err(BookingError::IncompleteSession("attendees"));
        }

        let candidates = session.candidate_slots();
        let chosen = candidates.get(index).ok_or_else(|| {
            ValidationError::out_of_range("slot", 1, candidates.len() as i64, index as i64 + 1)
        })?;

        // 2. The meeting runs for the requested duration from the slot start
        let slot = TimeSlot::starting_at(chosen.start, duration);
        let event = NewCalendarEvent {
            subject: subject.to_string(),
            body: self.template.body.clone(),
            start: format_booking_timestamp(&slot.start),
            end: format_booking_timestamp(&slot.end),
            time_zone: BOOKING_TIME_ZONE.to_string(),
            location: self.template.location.clone(),
            attendees: attendees.to_vec(),
        };

        // 3. Create it
        let created = with_timeout(
            self.call_timeout,
            self.calendar.create_event(session.access_token(), &event),
        )
        .await?;
        tracing::info!(event_id = %created.id, attendees = attendees.len(), "meeting booked");

        let confirmation = render_confirmation(subject, attendees, &slot);
        Ok(BookMeetingResult {
            event: created,
            slot,
            confirmation,
        })
    }
}

/// Human-readable summary of a booked meeting.
fn render_confirmation(subject: &str, attendees: &[String], slot: &TimeSlot) -> String {
    format!(
        "Your meeting \"{}\" with {} is booked for {} - {} UTC.",
        subject,
        attendees.join(", "),
        slot.start.format("%A, %B %-d, %Y %H:%M"),
        slot.end.format("%H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::calendar::MockCalendarService;
    use crate::domain::foundation::AccessToken;
    use crate::ports::CalendarError;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn slot_at(hour: u32) -> TimeSlot {
        TimeSlot::starting_at(Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(), 60)
    }

    fn session_with_slots() -> MeetingSession {
        let mut session = MeetingSession::new(AccessToken::new("token"));
        session.set_subject("Sync".into());
        session.set_duration_minutes(30).unwrap();
        session
            .set_attendee_emails(vec!["a@x.com".into(), "b@x.com".into()])
            .unwrap();
        session.request_date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        session.set_candidate_slots(vec![slot_at(9), slot_at(11)]);
        session
    }

    fn handler(calendar: &MockCalendarService) -> BookMeetingHandler {
        BookMeetingHandler::new(
            Arc::new(calendar.clone()),
            EventTemplate {
                body: "Agenda to follow".into(),
                location: "Room 1".into(),
            },
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn books_chosen_slot_for_requested_duration() {
        let calendar = MockCalendarService::new().with_created_event("evt-1");

        let result = handler(&calendar).handle(&session_with_slots(), 1).await.unwrap();

        assert_eq!(result.event.id, "evt-1");
        let events = calendar.created_events();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.subject, "Sync");
        assert_eq!(event.start, "2024-05-01T11:00:00.000Z");
        assert_eq!(event.end, "2024-05-01T11:30:00.000Z");
        assert_eq!(event.time_zone, "UTC");
        assert_eq!(event.body, "Agenda to follow");
        assert_eq!(event.location, "Room 1");
        assert_eq!(event.attendees, vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn default_template_fills_body_and_location() {
        let calendar = MockCalendarService::new();
        let handler = BookMeetingHandler::new(
            Arc::new(calendar.clone()),
            EventTemplate::default(),
            Duration::from_secs(5),
        );

        handler.handle(&session_with_slots(), 0).await.unwrap();

        let event = &calendar.created_events()[0];
        assert_eq!(event.location, "Online meeting");
        assert!(!event.body.trim().is_empty());
    }

    #[tokio::test]
    async fn confirmation_names_subject_attendees_and_time() {
        let calendar = MockCalendarService::new();
        let result = handler(&calendar).handle(&session_with_slots(), 0).await.unwrap();

        assert_eq!(
            result.confirmation,
            "Your meeting \"Sync\" with a@x.com, b@x.com is booked for Wednesday, May 1, 2024 09:00 - 09:30 UTC."
        );
    }

    #[tokio::test]
    async fn out_of_range_index_makes_no_call() {
        let calendar = MockCalendarService::new();
        let result = handler(&calendar).handle(&session_with_slots(), 2).await;

        assert!(matches!(result, Err(BookingError::InvalidSlot(_))));
        assert!(calendar.created_events().is_empty());
    }

    #[tokio::test]
    async fn service_failure_is_booking_error() {
        let calendar = MockCalendarService::new().with_create_error(CalendarError::AuthExpired);
        let result = handler(&calendar).handle(&session_with_slots(), 0).await;

        assert!(matches!(
            result,
            Err(BookingError::Calendar(CalendarError::AuthExpired))
        ));
        assert_eq!(calendar.created_events().len(), 1);
    }

    #[tokio::test]
    async fn missing_subject_is_incomplete() {
        let calendar = MockCalendarService::new();
        let session = MeetingSession::new(AccessToken::new("token"));
        let result = handler(&calendar).handle(&session, 0).await;
        assert!(matches!(result, Err(BookingError::IncompleteSession("subject"))));
    }
}
