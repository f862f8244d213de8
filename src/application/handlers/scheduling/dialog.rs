//! MeetingDialog - one conversation turn at a time.
//!
//! `handle_turn` is the whole state machine: it reads the session's stage,
//! validates the input for that stage, writes the session and returns what to
//! say. Rejected input leaves the session untouched and re-prompts.

use tracing::Instrument;

use crate::domain::foundation::ValidationError;
use crate::domain::scheduling::validators::{
    parse_calendar_date, parse_choice_index, parse_email_list, parse_natural_number,
};
use crate::domain::scheduling::{DialogStage, MeetingSession, SchedulingError, SuggestionError};

use super::{BookMeetingHandler, SuggestMeetingTimesHandler};

/// Reply to input arriving after the conversation ended.
const FINISHED_NOTICE: &str =
    "This conversation is finished. Start a new one to book another meeting.";

const RETRY_DATE: &str = "Please enter another date.";

/// What one turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Outbound messages, in order.
    pub messages: Vec<String>,
    /// Stage the session is in after the turn.
    pub stage: DialogStage,
}

impl TurnOutcome {
    fn new(messages: Vec<String>, stage: DialogStage) -> Self {
        Self { messages, stage }
    }

    /// Corrective message followed by the stage's own prompt.
    fn rejected(reason: impl Into<String>, stage: DialogStage) -> Self {
        Self::new(vec![reason.into(), stage.prompt().to_string()], stage)
    }
}

/// The scheduling conversation's transition function.
pub struct MeetingDialog {
    suggest: SuggestMeetingTimesHandler,
    book: BookMeetingHandler,
}

impl MeetingDialog {
    pub fn new(suggest: SuggestMeetingTimesHandler, book: BookMeetingHandler) -> Self {
        Self { suggest, book }
    }

    /// First question of every conversation.
    pub fn opening_prompt(&self) -> &'static str {
        DialogStage::AwaitingSubject.prompt()
    }

    /// Applies one user message to `session`.
    ///
    /// # Errors
    ///
    /// `SchedulingError::Booking` when event creation fails; the session is
    /// then in `DialogStage::Failed`.
    pub async fn handle_turn(
        &self,
        session: &mut MeetingSession,
        input: &str,
    ) -> Result<TurnOutcome, SchedulingError> {
        let span = tracing::info_span!(
            "turn",
            conversation_id = %session.id(),
            stage = %session.stage(),
        );
        self.dispatch(session, input).instrument(span).await
    }

    async fn dispatch(
        &self,
        session: &mut MeetingSession,
        input: &str,
    ) -> Result<TurnOutcome, SchedulingError> {
        match session.stage() {
            DialogStage::AwaitingSubject => Self::on_subject(session, input),
            DialogStage::AwaitingDuration => Self::on_duration(session, input),
            DialogStage::AwaitingAttendees => Self::on_attendees(session, input),
            DialogStage::AwaitingDate => self.on_date(session, input).await,
            DialogStage::AwaitingSlotSelection => self.on_slot_selection(session, input).await,
            stage @ (DialogStage::Booked | DialogStage::Failed) => {
                tracing::debug!("input after conversation ended");
                Ok(TurnOutcome::new(vec![FINISHED_NOTICE.to_string()], stage))
            }
        }
    }

    fn on_subject(session: &mut MeetingSession, input: &str) -> Result<TurnOutcome, SchedulingError> {
        let subject = input.trim();
        if subject.is_empty() {
            return Ok(TurnOutcome::rejected(
                "The subject cannot be empty.",
                DialogStage::AwaitingSubject,
            ));
        }

        session.set_subject(subject.to_string());
        advance(session, DialogStage::AwaitingDuration)?;
        Ok(TurnOutcome::new(
            vec![
                format!("The subject is \"{}\".", subject),
                DialogStage::AwaitingDuration.prompt().to_string(),
            ],
            DialogStage::AwaitingDuration,
        ))
    }

    fn on_duration(session: &mut MeetingSession, input: &str) -> Result<TurnOutcome, SchedulingError> {
        let parsed = parse_natural_number("duration", input)
            .and_then(|minutes| session.set_duration_minutes(minutes).map(|()| minutes));

        let minutes = match parsed {
            Ok(minutes) => minutes,
            Err(err) => {
                tracing::debug!(error = %err, "duration rejected");
                let reason = match err {
                    ValidationError::OutOfRange { .. } => "The duration must be at least one minute.",
                    _ => "Please enter only number.",
                };
                return Ok(TurnOutcome::rejected(reason, DialogStage::AwaitingDuration));
            }
        };

        advance(session, DialogStage::AwaitingAttendees)?;
        Ok(TurnOutcome::new(
            vec![
                format!("The meeting will last {} minutes.", minutes),
                DialogStage::AwaitingAttendees.prompt().to_string(),
            ],
            DialogStage::AwaitingAttendees,
        ))
    }

    fn on_attendees(session: &mut MeetingSession, input: &str) -> Result<TurnOutcome, SchedulingError> {
        let mut messages = vec!["You would like to invite ".to_string()];
        let stored = parse_email_list("attendees", input).and_then(|emails| {
            messages.extend(emails.iter().cloned());
            session.set_attendee_emails(emails)
        });

        if let Err(err) = stored {
            tracing::debug!(error = %err, "attendee list rejected");
            return Ok(TurnOutcome::rejected(
                "Please enter only emails.",
                DialogStage::AwaitingAttendees,
            ));
        }

        messages.push(DialogStage::AwaitingDate.prompt().to_string());
        advance(session, DialogStage::AwaitingDate)?;
        Ok(TurnOutcome::new(messages, DialogStage::AwaitingDate))
    }

    async fn on_date(
        &self,
        session: &mut MeetingSession,
        input: &str,
    ) -> Result<TurnOutcome, SchedulingError> {
        let date = match parse_calendar_date("date", input) {
            Ok(date) => date,
            Err(err) => {
                tracing::debug!(error = %err, "date rejected");
                return Ok(TurnOutcome::rejected(
                    "That is not a date I recognize.",
                    DialogStage::AwaitingDate,
                ));
            }
        };

        session.request_date(date);
        let found = match self.suggest.handle(session).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(error = %err, code = %err.code(), %date, "no slots offered");
                let reason = match err {
                    SuggestionError::NoAvailability => {
                        format!("No time on {} works for everyone.", date)
                    }
                    _ => format!("I could not check availability for {}.", date),
                };
                return Ok(TurnOutcome::new(
                    vec![reason, RETRY_DATE.to_string()],
                    DialogStage::AwaitingDate,
                ));
            }
        };

        session.set_candidate_slots(found.slots);
        advance(session, DialogStage::AwaitingSlotSelection)?;
        Ok(TurnOutcome::new(
            vec![
                format!("These times on {} work for everyone:", date),
                found.listing,
                DialogStage::AwaitingSlotSelection.prompt().to_string(),
            ],
            DialogStage::AwaitingSlotSelection,
        ))
    }

    async fn on_slot_selection(
        &self,
        session: &mut MeetingSession,
        input: &str,
    ) -> Result<TurnOutcome, SchedulingError> {
        let count = session.candidate_slots().len();
        let index = match parse_choice_index("slot", input, count) {
            Ok(index) => index,
            Err(err) => {
                tracing::debug!(error = %err, "slot choice rejected");
                return Ok(TurnOutcome::rejected(
                    format!("Please enter a number between 1 and {}.", count),
                    DialogStage::AwaitingSlotSelection,
                ));
            }
        };

        match self.book.handle(session, index).await {
            Ok(booked) => {
                advance(session, DialogStage::Booked)?;
                Ok(TurnOutcome::new(vec![booked.confirmation], DialogStage::Booked))
            }
            Err(err) => {
                tracing::error!(error = %err, code = %err.code(), "booking failed");
                advance(session, DialogStage::Failed)?;
                Err(err.into())
            }
        }
    }
}

fn advance(session: &mut MeetingSession, target: DialogStage) -> Result<(), SchedulingError> {
    session
        .advance_to(target)
        .map_err(SchedulingError::InvalidTransition)
}
