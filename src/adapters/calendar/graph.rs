//! Microsoft Graph calendar adapter.
//!
//! Implements `CalendarService` and `UserDirectory` against the Graph v1.0
//! REST API:
//!
//! - `POST /me/findMeetingTimes` for availability search
//! - `POST /me/events` for booking
//! - `GET /me` for the greeting
//!
//! # Configuration
//!
//! ```ignore
//! let config = GraphConfig::new()
//!     .with_base_url("https://graph.microsoft.com/v1.0")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let calendar = GraphCalendarService::new(config)?;
//! ```
//!
//! All timestamps are requested and returned in UTC via the
//! `Prefer: outlook.timezone="UTC"` header.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{AccessToken, UserProfile};
use crate::ports::{
    CalendarError, CalendarService, CreatedEvent, MeetingTimeCandidate, MeetingTimeQuery,
    NewCalendarEvent, SearchWindow, UserDirectory,
};

/// Configuration for the Graph adapter.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// API root without trailing slash (default: https://graph.microsoft.com/v1.0).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GraphConfig {
    /// Creates a configuration pointing at the public Graph endpoint.
    pub fn new() -> Self {
        Self {
            base_url: "https://graph.microsoft.com/v1.0".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::new()
    }
}

const PREFER_UTC: &str = "outlook.timezone=\"UTC\"";
const UTC_ZONE: &str = "UTC";

/// Graph-backed calendar service.
pub struct GraphCalendarService {
    config: GraphConfig,
    client: Client,
}

impl GraphCalendarService {
    /// Creates the adapter.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::Network` if the HTTP client cannot be built.
    pub fn new(config: GraphConfig) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CalendarError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, token: &AccessToken) -> RequestBuilder {
        builder
            .bearer_auth(token.expose())
            .header("Prefer", PREFER_UTC)
    }

    /// Sends a request, mapping transport failures.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, CalendarError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CalendarError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                CalendarError::network(format!("Connection failed: {}", e))
            } else {
                CalendarError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "calendar request rejected");
        Err(map_error_status(status.as_u16(), &body))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CalendarError> {
        response
            .json()
            .await
            .map_err(|e| CalendarError::parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CalendarService for GraphCalendarService {
    async fn find_meeting_times(
        &self,
        token: &AccessToken,
        query: &MeetingTimeQuery,
    ) -> Result<Vec<MeetingTimeCandidate>, CalendarError> {
        let body = FindMeetingTimesRequest::from(query);
        let request = self.authorized(self.client.post(self.url("/me/findMeetingTimes")), token);

        let response = self.send(request.json(&body)).await?;
        let parsed: FindMeetingTimesResponse = Self::parse(response).await?;

        if parsed.meeting_time_suggestions.is_empty() {
            tracing::debug!(
                reason = parsed.empty_suggestions_reason.as_deref().unwrap_or(""),
                "no meeting time suggestions"
            );
        }

        Ok(parsed
            .meeting_time_suggestions
            .into_iter()
            .map(MeetingTimeCandidate::from)
            .collect())
    }

    async fn create_event(
        &self,
        token: &AccessToken,
        event: &NewCalendarEvent,
    ) -> Result<CreatedEvent, CalendarError> {
        let body = EventRequest::from(event);
        let request = self.authorized(self.client.post(self.url("/me/events")), token);

        let response = self.send(request.json(&body)).await?;
        let created: EventResponse = Self::parse(response).await?;

        Ok(CreatedEvent {
            id: created.id,
            web_link: created.web_link,
        })
    }
}

#[async_trait]
impl UserDirectory for GraphCalendarService {
    async fn current_user(&self, token: &AccessToken) -> Result<UserProfile, CalendarError> {
        let request = self.authorized(self.client.get(self.url("/me")), token);
        let response = self.send(request).await?;
        let me: MeResponse = Self::parse(response).await?;

        Ok(UserProfile::new(
            me.display_name,
            me.mail.or(me.user_principal_name),
        ))
    }
}

/// Maps a non-success status to a calendar error.
fn map_error_status(status: u16, body: &str) -> CalendarError {
    let message = graph_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => CalendarError::AuthExpired,
        400 => CalendarError::InvalidRequest(message),
        429 => CalendarError::unavailable(format!("Throttled: {}", message)),
        500..=599 => CalendarError::unavailable(format!("Server error {}: {}", status, message)),
        _ => CalendarError::network(format!("Unexpected status {}: {}", status, message)),
    }
}

/// Extracts `error.message` from a Graph error body.
fn graph_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<GraphErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error.message)
}

/// ISO-8601 duration in whole minutes.
fn iso_minutes(minutes: u32) -> String {
    format!("PT{}M", minutes)
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateTimeTimeZone {
    date_time: String,
    time_zone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailAddress {
    address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Attendee {
    #[serde(rename = "type")]
    attendee_type: &'static str,
    email_address: EmailAddress,
}

impl Attendee {
    fn required(address: &str) -> Self {
        Self {
            attendee_type: "required",
            email_address: EmailAddress {
                address: address.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeSlotWire {
    start: DateTimeTimeZone,
    end: DateTimeTimeZone,
}

impl From<&SearchWindow> for TimeSlotWire {
    fn from(window: &SearchWindow) -> Self {
        let format = |at: &chrono::DateTime<chrono::Utc>| DateTimeTimeZone {
            date_time: at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            time_zone: UTC_ZONE.to_string(),
        };
        Self {
            start: format(&window.start),
            end: format(&window.end),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeConstraint {
    time_slots: Vec<TimeSlotWire>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindMeetingTimesRequest {
    attendees: Vec<Attendee>,
    time_constraint: TimeConstraint,
    meeting_duration: String,
    max_candidates: u32,
    is_organizer_optional: bool,
    return_suggestion_reasons: bool,
    minimum_attendee_percentage: f64,
}

impl From<&MeetingTimeQuery> for FindMeetingTimesRequest {
    fn from(query: &MeetingTimeQuery) -> Self {
        Self {
            attendees: query.attendees.iter().map(|a| Attendee::required(a)).collect(),
            time_constraint: TimeConstraint {
                time_slots: query.windows.iter().map(TimeSlotWire::from).collect(),
            },
            meeting_duration: iso_minutes(query.duration_minutes),
            max_candidates: query.max_candidates,
            is_organizer_optional: query.organizer_optional,
            return_suggestion_reasons: query.return_suggestion_reasons,
            minimum_attendee_percentage: f64::from(query.minimum_attendee_percentage.value()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindMeetingTimesResponse {
    #[serde(default)]
    meeting_time_suggestions: Vec<MeetingTimeSuggestion>,
    empty_suggestions_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingTimeSuggestion {
    meeting_time_slot: SuggestedSlot,
    suggestion_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestedSlot {
    start: DateTimeTimeZone,
    end: DateTimeTimeZone,
}

impl From<MeetingTimeSuggestion> for MeetingTimeCandidate {
    fn from(suggestion: MeetingTimeSuggestion) -> Self {
        let SuggestedSlot { start, end } = suggestion.meeting_time_slot;
        Self {
            start: start.date_time,
            end: end.date_time,
            time_zone: start.time_zone,
            suggestion_reason: suggestion.suggestion_reason.filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemBody {
    content_type: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventRequest {
    subject: String,
    body: ItemBody,
    start: DateTimeTimeZone,
    end: DateTimeTimeZone,
    location: Location,
    attendees: Vec<Attendee>,
}

impl From<&NewCalendarEvent> for EventRequest {
    fn from(event: &NewCalendarEvent) -> Self {
        Self {
            subject: event.subject.clone(),
            body: ItemBody {
                content_type: "HTML",
                content: event.body.clone(),
            },
            start: DateTimeTimeZone {
                date_time: event.start.clone(),
                time_zone: event.time_zone.clone(),
            },
            end: DateTimeTimeZone {
                date_time: event.end.clone(),
                time_zone: event.time_zone.clone(),
            },
            location: Location {
                display_name: event.location.clone(),
            },
            attendees: event.attendees.iter().map(|a| Attendee::required(a)).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    id: String,
    web_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    display_name: Option<String>,
    mail: Option<String>,
    user_principal_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn query() -> MeetingTimeQuery {
        let window = SearchWindow {
            start: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
        };
        MeetingTimeQuery::new(vec!["a@x.com".into(), "b@x.com".into()], vec![window], 30)
    }

    #[test]
    fn config_builder_works() {
        let config = GraphConfig::new()
            .with_base_url("http://localhost:8080/v1.0/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://localhost:8080/v1.0");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn adapter_builds_urls_from_base() {
        let calendar = GraphCalendarService::new(GraphConfig::new()).unwrap();
        assert_eq!(
            calendar.url("/me/events"),
            "https://graph.microsoft.com/v1.0/me/events"
        );
    }

    mod request_mapping {
        use super::*;

        #[test]
        fn find_meeting_times_body_matches_graph_shape() {
            let body = serde_json::to_value(FindMeetingTimesRequest::from(&query())).unwrap();

            assert_eq!(body["meetingDuration"], "PT30M");
            assert_eq!(body["maxCandidates"], 15);
            assert_eq!(body["isOrganizerOptional"], true);
            assert_eq!(body["returnSuggestionReasons"], true);
            assert_eq!(body["minimumAttendeePercentage"], 100.0);
            assert_eq!(body["attendees"][1]["emailAddress"]["address"], "b@x.com");
            assert_eq!(body["attendees"][0]["type"], "required");

            let slot = &body["timeConstraint"]["timeSlots"][0];
            assert_eq!(slot["start"]["dateTime"], "2024-05-01T00:00:00");
            assert_eq!(slot["end"]["dateTime"], "2024-05-02T00:00:00");
            assert_eq!(slot["start"]["timeZone"], "UTC");
        }

        #[test]
        fn event_body_matches_graph_shape() {
            let event = NewCalendarEvent {
                subject: "Sync".into(),
                body: "Agenda".into(),
                start: "2024-05-01T09:00:00.000Z".into(),
                end: "2024-05-01T09:30:00.000Z".into(),
                time_zone: "UTC".into(),
                location: "Room 1".into(),
                attendees: vec!["a@x.com".into()],
            };
            let body = serde_json::to_value(EventRequest::from(&event)).unwrap();

            assert_eq!(body["subject"], "Sync");
            assert_eq!(body["body"]["contentType"], "HTML");
            assert_eq!(body["start"]["dateTime"], "2024-05-01T09:00:00.000Z");
            assert_eq!(body["end"]["timeZone"], "UTC");
            assert_eq!(body["location"]["displayName"], "Room 1");
            assert_eq!(body["attendees"][0]["emailAddress"]["address"], "a@x.com");
        }

        #[test]
        fn iso_duration() {
            assert_eq!(iso_minutes(45), "PT45M");
        }
    }

    mod response_mapping {
        use super::*;

        #[test]
        fn suggestions_become_candidates() {
            let json = r#"{
                "emptySuggestionsReason": "",
                "meetingTimeSuggestions": [{
                    "confidence": 100.0,
                    "suggestionReason": "Suggested because it is one of the nearest available times.",
                    "meetingTimeSlot": {
                        "start": {"dateTime": "2024-05-01T09:00:00.0000000", "timeZone": "UTC"},
                        "end": {"dateTime": "2024-05-01T09:30:00.0000000", "timeZone": "UTC"}
                    }
                }]
            }"#;
            let parsed: FindMeetingTimesResponse = serde_json::from_str(json).unwrap();
            let candidates: Vec<MeetingTimeCandidate> = parsed
                .meeting_time_suggestions
                .into_iter()
                .map(MeetingTimeCandidate::from)
                .collect();

            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].start, "2024-05-01T09:00:00.0000000");
            assert_eq!(candidates[0].time_zone, "UTC");
            assert!(candidates[0].suggestion_reason.is_some());
        }

        #[test]
        fn missing_suggestions_is_empty() {
            let parsed: FindMeetingTimesResponse =
                serde_json::from_str(r#"{"emptySuggestionsReason": "AttendeesUnavailable"}"#)
                    .unwrap();
            assert!(parsed.meeting_time_suggestions.is_empty());
            assert_eq!(
                parsed.empty_suggestions_reason.as_deref(),
                Some("AttendeesUnavailable")
            );
        }

        #[test]
        fn me_falls_back_to_principal_name() {
            let me: MeResponse =
                serde_json::from_str(r#"{"displayName": null, "userPrincipalName": "ada@x.com"}"#)
                    .unwrap();
            assert!(me.display_name.is_none());
            assert_eq!(me.user_principal_name.as_deref(), Some("ada@x.com"));
        }
    }

    mod status_mapping {
        use super::*;

        #[test]
        fn unauthorized_is_auth_expired() {
            assert_eq!(map_error_status(401, ""), CalendarError::AuthExpired);
        }

        #[test]
        fn bad_request_keeps_graph_message() {
            let body = r#"{"error": {"code": "ErrorInvalidRequest", "message": "Bad attendee"}}"#;
            assert_eq!(
                map_error_status(400, body),
                CalendarError::InvalidRequest("Bad attendee".into())
            );
        }

        #[test]
        fn server_errors_are_transient() {
            let err = map_error_status(503, "down");
            assert!(matches!(err, CalendarError::Unavailable { .. }));
            assert!(err.is_transient());
        }

        #[test]
        fn unexpected_status_is_network() {
            assert!(matches!(map_error_status(418, ""), CalendarError::Network(_)));
        }
    }
}
