//! Process-level settings: environment and logging

use serde::Deserialize;

use super::error::ValidationError;

/// Runtime settings shared by the whole process
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl AppSettings {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate runtime settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_level.trim().is_empty() {
            return Err(ValidationError::InvalidLogFilter(self.log_level.clone()));
        }
        tracing_subscriber::EnvFilter::try_new(&self.log_level)
            .map_err(|e| ValidationError::InvalidLogFilter(e.to_string()))?;
        Ok(())
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,meeting_scheduler=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.environment, Environment::Development);
        assert_eq!(settings.log_level, "info,meeting_scheduler=debug");
        assert!(!settings.log_json);
    }

    #[test]
    fn test_is_production() {
        let mut settings = AppSettings::default();
        assert!(!settings.is_production());

        settings.environment = Environment::Production;
        assert!(settings.is_production());
    }

    #[test]
    fn test_validation_rejects_blank_log_level() {
        let settings = AppSettings {
            log_level: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_malformed_filter() {
        let settings = AppSettings {
            log_level: "meeting_scheduler=[".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
