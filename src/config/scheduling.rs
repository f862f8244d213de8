//! Scheduling policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::EventTemplate;
use crate::domain::scheduling::DayWindow;

/// How availability is searched and how booked events look.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Start of the searchable part of a day, `HH:MM` UTC
    #[serde(default = "default_window_start")]
    pub window_start: String,

    /// End of the searchable part of a day, `HH:MM` UTC; `24:00` is midnight
    #[serde(default = "default_window_end")]
    pub window_end: String,

    /// Upper bound on suggestions requested from the calendar
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u32,

    /// Body text of created events
    #[serde(default = "default_event_body")]
    pub event_body: String,

    /// Location display name of created events
    #[serde(default = "default_event_location")]
    pub event_location: String,
}

impl SchedulingConfig {
    /// Parsed search window.
    pub fn day_window(&self) -> Result<DayWindow, ValidationError> {
        DayWindow::parse(&self.window_start, &self.window_end)
            .map_err(|e| ValidationError::InvalidSearchWindow(e.to_string()))
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.day_window()?;
        if self.max_candidates == 0 || self.max_candidates > 100 {
            return Err(ValidationError::InvalidMaxCandidates);
        }
        if self.event_location.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SCHEDULING__EVENT_LOCATION"));
        }
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            window_start: default_window_start(),
            window_end: default_window_end(),
            max_candidates: default_max_candidates(),
            event_body: default_event_body(),
            event_location: default_event_location(),
        }
    }
}

fn default_window_start() -> String {
    "00:00".to_string()
}

fn default_window_end() -> String {
    "24:00".to_string()
}

fn default_max_candidates() -> u32 {
    15
}

fn default_event_body() -> String {
    EventTemplate::default().body
}

fn default_event_location() -> String {
    EventTemplate::default().location
}
