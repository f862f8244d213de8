//! Mock calendar backend for testing.
//!
//! Provides a configurable implementation of the `CalendarService` and
//! `UserDirectory` ports, allowing the scheduling flow to run without a real
//! calendar API.
//!
//! # Example
//!
//! ```ignore
//! let calendar = MockCalendarService::new()
//!     .with_candidates(vec![MeetingTimeCandidate::new(
//!         "2024-05-01T09:00:00.0000000",
//!         "2024-05-01T09:30:00.0000000",
//!         "UTC",
//!     )]);
//!
//! let found = calendar.find_meeting_times(&token, &query).await?;
//! assert_eq!(calendar.queries().len(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{AccessToken, UserProfile};
use crate::ports::{
    CalendarError, CalendarService, CreatedEvent, MeetingTimeCandidate, MeetingTimeQuery,
    NewCalendarEvent, UserDirectory,
};

/// Mock calendar service.
///
/// Search and create responses are consumed in order. Once a queue is empty
/// searches return no candidates and creates succeed with a generated id.
#[derive(Debug, Clone, Default)]
pub struct MockCalendarService {
    search_responses: Arc<Mutex<VecDeque<Result<Vec<MeetingTimeCandidate>, CalendarError>>>>,
    create_responses: Arc<Mutex<VecDeque<Result<CreatedEvent, CalendarError>>>>,
    profile: Arc<Mutex<Option<Result<UserProfile, CalendarError>>>>,
    delay: Duration,
    queries: Arc<Mutex<Vec<MeetingTimeQuery>>>,
    events: Arc<Mutex<Vec<NewCalendarEvent>>>,
}

impl MockCalendarService {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful search result.
    pub fn with_candidates(self, candidates: Vec<MeetingTimeCandidate>) -> Self {
        self.search_responses.lock().unwrap().push_back(Ok(candidates));
        self
    }

    /// Queues a failing search.
    pub fn with_search_error(self, error: CalendarError) -> Self {
        self.search_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Queues a successful create with the given event id.
    pub fn with_created_event(self, id: impl Into<String>) -> Self {
        self.create_responses.lock().unwrap().push_back(Ok(CreatedEvent {
            id: id.into(),
            web_link: None,
        }));
        self
    }

    /// Queues a failing create.
    pub fn with_create_error(self, error: CalendarError) -> Self {
        self.create_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets the profile returned by `current_user`.
    pub fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.lock().unwrap() = Some(Ok(profile));
        self
    }

    /// Makes `current_user` fail.
    pub fn with_profile_error(self, error: CalendarError) -> Self {
        *self.profile.lock().unwrap() = Some(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All search queries received so far.
    pub fn queries(&self) -> Vec<MeetingTimeQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// All events the mock was asked to create.
    pub fn created_events(&self) -> Vec<NewCalendarEvent> {
        self.events.lock().unwrap().clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl CalendarService for MockCalendarService {
    async fn find_meeting_times(
        &self,
        _token: &AccessToken,
        query: &MeetingTimeQuery,
    ) -> Result<Vec<MeetingTimeCandidate>, CalendarError> {
        self.queries.lock().unwrap().push(query.clone());
        self.simulate_latency().await;

        self.search_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_event(
        &self,
        _token: &AccessToken,
        event: &NewCalendarEvent,
    ) -> Result<CreatedEvent, CalendarError> {
        let count = {
            let mut events = self.events.lock().unwrap();
            events.push(event.clone());
            events.len()
        };
        self.simulate_latency().await;

        self.create_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(CreatedEvent {
                    id: format!("mock-event-{}", count),
                    web_link: None,
                })
            })
    }
}

#[async_trait]
impl UserDirectory for MockCalendarService {
    async fn current_user(&self, _token: &AccessToken) -> Result<UserProfile, CalendarError> {
        self.simulate_latency().await;
        self.profile
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(UserProfile::new(None, None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("mock-token")
    }

    fn query() -> MeetingTimeQuery {
        MeetingTimeQuery::new(vec!["a@x.com".into()], vec![], 30)
    }

    fn event() -> NewCalendarEvent {
        NewCalendarEvent {
            subject: "Sync".into(),
            body: String::new(),
            start: "2024-05-01T09:00:00.000Z".into(),
            end: "2024-05-01T09:30:00.000Z".into(),
            time_zone: "UTC".into(),
            location: String::new(),
            attendees: vec!["a@x.com".into()],
        }
    }

    #[tokio::test]
    async fn returns_search_responses_in_order_then_empty() {
        let calendar = MockCalendarService::new()
            .with_candidates(vec![MeetingTimeCandidate::new("a", "b", "UTC")])
            .with_search_error(CalendarError::unavailable("503"));

        assert_eq!(calendar.find_meeting_times(&token(), &query()).await.unwrap().len(), 1);
        assert!(calendar.find_meeting_times(&token(), &query()).await.is_err());
        assert!(calendar.find_meeting_times(&token(), &query()).await.unwrap().is_empty());
        assert_eq!(calendar.queries().len(), 3);
    }

    #[tokio::test]
    async fn create_records_event_and_generates_id() {
        let calendar = MockCalendarService::new();
        let created = calendar.create_event(&token(), &event()).await.unwrap();

        assert_eq!(created.id, "mock-event-1");
        assert_eq!(calendar.created_events(), vec![event()]);
    }

    #[tokio::test]
    async fn create_error_is_returned() {
        let calendar = MockCalendarService::new().with_create_error(CalendarError::AuthExpired);
        let result = calendar.create_event(&token(), &event()).await;
        assert_eq!(result, Err(CalendarError::AuthExpired));
        assert_eq!(calendar.created_events().len(), 1);
    }

    #[tokio::test]
    async fn profile_defaults_to_anonymous() {
        let calendar = MockCalendarService::new();
        let profile = calendar.current_user(&token()).await.unwrap();
        assert!(profile.greeting_name().is_none());

        let calendar = calendar.with_profile(UserProfile::new(Some("Ada".into()), None));
        let profile = calendar.current_user(&token()).await.unwrap();
        assert_eq!(profile.greeting_name(), Some("Ada"));
    }

    #[tokio::test]
    async fn clones_share_recorded_calls() {
        let calendar = MockCalendarService::new();
        let handle = calendar.clone();
        calendar.find_meeting_times(&token(), &query()).await.unwrap();
        assert_eq!(handle.queries().len(), 1);
    }
}
