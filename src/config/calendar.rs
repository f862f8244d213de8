//! Calendar backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::app::Environment;
use super::error::ValidationError;

/// Calendar backend configuration (Microsoft Graph)
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Graph API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for any single calendar call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CalendarConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate calendar configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidCalendarUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::CalendarUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_timeout() -> u64 {
    30
}
