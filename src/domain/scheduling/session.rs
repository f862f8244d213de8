//! The per-conversation scheduling session.
//!
//! One `MeetingSession` exists per conversation and is owned by whoever drives
//! that conversation. Each field is written by exactly one stage handler and
//! only with values that already passed that stage's validator.

use chrono::NaiveDate;

use crate::domain::foundation::{AccessToken, ConversationId, StateMachine, ValidationError};

use super::stage::DialogStage;
use super::time_slot::TimeSlot;

/// Accumulated meeting parameters for one conversation.
#[derive(Debug, Clone)]
pub struct MeetingSession {
    id: ConversationId,
    access_token: AccessToken,
    subject: Option<String>,
    duration_minutes: Option<u32>,
    attendee_emails: Vec<String>,
    requested_date: Option<NaiveDate>,
    candidate_slots: Vec<TimeSlot>,
    stage: DialogStage,
}

impl MeetingSession {
    /// Starts a session for an authenticated user at the subject stage.
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            id: ConversationId::new(),
            access_token,
            subject: None,
            duration_minutes: None,
            attendee_emails: Vec::new(),
            requested_date: None,
            candidate_slots: Vec::new(),
            stage: DialogStage::default(),
        }
    }

    // === Accessors ===

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    pub fn attendee_emails(&self) -> &[String] {
        &self.attendee_emails
    }

    pub fn requested_date(&self) -> Option<NaiveDate> {
        self.requested_date
    }

    pub fn candidate_slots(&self) -> &[TimeSlot] {
        &self.candidate_slots
    }

    pub fn stage(&self) -> DialogStage {
        self.stage
    }

    // === Stage writes ===

    pub(crate) fn set_subject(&mut self, subject: String) {
        self.subject = Some(subject);
    }

    /// Stores the duration; zero is rejected.
    pub(crate) fn set_duration_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::out_of_range(
                "duration",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        self.duration_minutes = Some(minutes);
        Ok(())
    }

    /// Stores the attendee list; an empty list is rejected.
    pub(crate) fn set_attendee_emails(&mut self, emails: Vec<String>) -> Result<(), ValidationError> {
        if emails.is_empty() {
            return Err(ValidationError::empty_field("attendees"));
        }
        self.attendee_emails = emails;
        Ok(())
    }

    /// Records a new requested date and drops slots found for the previous one.
    pub(crate) fn request_date(&mut self, date: NaiveDate) {
        self.requested_date = Some(date);
        self.candidate_slots.clear();
    }

    pub(crate) fn set_candidate_slots(&mut self, slots: Vec<TimeSlot>) {
        self.candidate_slots = slots;
    }

    /// Moves to `target` if the stage graph allows it.
    pub(crate) fn advance_to(&mut self, target: DialogStage) -> Result<(), ValidationError> {
        self.stage = self.stage.transition_to(target)?;
        Ok(())
    }
}
