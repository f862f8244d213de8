//! Calendar Service Port - availability search and event creation.
//!
//! Abstracts the calendar backend so the scheduling workflow can query free
//! slots and book meetings without knowing the provider's API shape,
//! pagination or rate limits.
//!
//! # Example
//!
//! ```ignore
//! let query = MeetingTimeQuery::new(attendees, vec![window], 30);
//! let candidates = calendar.find_meeting_times(&token, &query).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{AccessToken, Percentage, UserProfile};

/// Port for calendar availability and booking.
///
/// # Contract
///
/// Implementations must:
/// - Return candidates in the order the backend ranked them
/// - Return `CalendarError::AuthExpired` when the token is rejected
/// - Never retry on their own; the caller decides what a failure means
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Finds windows where the requested attendees are free.
    async fn find_meeting_times(
        &self,
        token: &AccessToken,
        query: &MeetingTimeQuery,
    ) -> Result<Vec<MeetingTimeCandidate>, CalendarError>;

    /// Creates an event on the signed-in user's calendar and invites attendees.
    async fn create_event(
        &self,
        token: &AccessToken,
        event: &NewCalendarEvent,
    ) -> Result<CreatedEvent, CalendarError>;
}

/// Port for looking up the signed-in user.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the profile bound to `token`.
    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, CalendarError>;
}

/// A time range the search may place the meeting in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Availability search request.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingTimeQuery {
    /// Attendee addresses, all required.
    pub attendees: Vec<String>,
    /// Windows to search within (UTC).
    pub windows: Vec<SearchWindow>,
    /// Meeting length.
    pub duration_minutes: u32,
    /// Upper bound on returned suggestions.
    pub max_candidates: u32,
    /// Whether the organizer may be busy during a suggestion.
    pub organizer_optional: bool,
    /// Ask the backend to explain each suggestion.
    pub return_suggestion_reasons: bool,
    /// Share of attendees that must be free; always 100.
    pub minimum_attendee_percentage: Percentage,
}

impl MeetingTimeQuery {
    /// Creates a query with strict defaults: everyone must be free.
    pub fn new(attendees: Vec<String>, windows: Vec<SearchWindow>, duration_minutes: u32) -> Self {
        Self {
            attendees,
            windows,
            duration_minutes,
            max_candidates: 15,
            organizer_optional: true,
            return_suggestion_reasons: true,
            minimum_attendee_percentage: Percentage::HUNDRED,
        }
    }

    /// Sets the maximum number of candidates.
    pub fn with_max_candidates(mut self, max: u32) -> Self {
        self.max_candidates = max;
        self
    }
}

/// One suggested slot, as the backend described it.
///
/// Timestamps stay as text; the suggestion engine decides which ones parse.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingTimeCandidate {
    pub start: String,
    pub end: String,
    pub time_zone: String,
    pub suggestion_reason: Option<String>,
}

impl MeetingTimeCandidate {
    /// Creates a candidate with no reason.
    pub fn new(start: impl Into<String>, end: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            time_zone: time_zone.into(),
            suggestion_reason: None,
        }
    }

    /// Attaches the backend's explanation.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.suggestion_reason = Some(reason.into());
        self
    }
}

/// Event creation request. Timestamps are pre-rendered wire strings in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendarEvent {
    pub subject: String,
    pub body: String,
    pub start: String,
    pub end: String,
    pub time_zone: String,
    pub location: String,
    pub attendees: Vec<String>,
}

/// Result of a successful create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// Backend identifier of the new event.
    pub id: String,
    /// Link to open the event, if the backend returns one.
    pub web_link: Option<String>,
}

/// Calendar service errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Token expired or was rejected.
    #[error("calendar authorization expired")]
    AuthExpired,

    /// Backend refused the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Backend is down or returned a server error.
    #[error("calendar unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// No response within the configured bound.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl CalendarError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if trying again later might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CalendarError::Unavailable { .. } | CalendarError::Network(_) | CalendarError::Timeout { .. }
        )
    }
}
