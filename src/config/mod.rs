//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `MEETING_SCHEDULER`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use meeting_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Calendar API at {}", config.calendar.base_url);
//! ```

mod app;
mod auth;
mod calendar;
mod error;
mod scheduling;

pub use app::{AppSettings, Environment};
pub use auth::AuthConfig;
pub use calendar::CalendarConfig;
pub use error::{ConfigError, ValidationError};
pub use scheduling::SchedulingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Process settings (environment, logging)
    #[serde(default)]
    pub app: AppSettings,

    /// Authentication configuration (Microsoft identity platform)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Calendar backend configuration (Microsoft Graph)
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Availability search and event defaults
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEETING_SCHEDULER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEETING_SCHEDULER__APP__LOG_LEVEL=debug` -> `app.log_level = "debug"`
    /// - `MEETING_SCHEDULER__AUTH__ACCESS_TOKEN=...` -> `auth.access_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEETING_SCHEDULER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.app.validate()?;
        self.auth.validate(&self.app.environment)?;
        self.calendar.validate(&self.app.environment)?;
        self.scheduling.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MEETING_SCHEDULER__AUTH__ACCESS_TOKEN", "eyJ0eXAi.test");
    }

    fn clear_env() {
        env::remove_var("MEETING_SCHEDULER__AUTH__ACCESS_TOKEN");
        env::remove_var("MEETING_SCHEDULER__APP__ENVIRONMENT");
        env::remove_var("MEETING_SCHEDULER__CALENDAR__TIMEOUT_SECS");
        env::remove_var("MEETING_SCHEDULER__SCHEDULING__WINDOW_END");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        let token = config.auth.access_token.as_ref().unwrap();
        assert_eq!(token.expose_secret(), "eyJ0eXAi.test");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.app.environment, Environment::Development);
        assert_eq!(config.calendar.timeout_secs, 30);
        assert_eq!(config.scheduling.window_end, "24:00");
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEETING_SCHEDULER__APP__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MEETING_SCHEDULER__CALENDAR__TIMEOUT_SECS", "10");
        env::set_var("MEETING_SCHEDULER__SCHEDULING__WINDOW_END", "18:00");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.calendar.timeout_secs, 10);
        assert_eq!(config.scheduling.window_end, "18:00");
    }

    #[test]
    fn test_missing_token_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN"))
        ));
    }
}
