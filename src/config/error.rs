//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Auth authority must use HTTPS in production")]
    AuthorityMustBeHttps,

    #[error("Calendar base URL must use HTTPS in production")]
    CalendarUrlMustBeHttps,

    #[error("Invalid calendar base URL")]
    InvalidCalendarUrl,

    #[error("Required scope not configured: {0}")]
    MissingScope(&'static str),

    #[error("Invalid search window: {0}")]
    InvalidSearchWindow(String),

    #[error("max_candidates must be between 1 and 100")]
    InvalidMaxCandidates,
}
