//! Authentication configuration

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;
use super::app::Environment;
use crate::ports::{SCOPE_CALENDARS_READ_WRITE, SCOPE_USER_READ};

/// Authentication configuration (Microsoft identity platform)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Authority URL, e.g. `https://login.microsoftonline.com/common`
    #[serde(default = "default_authority")]
    pub authority: String,

    /// OAuth2 client ID
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: Option<Secret<String>>,

    /// Where the identity provider redirects after sign-in
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,

    /// Delegated scopes (comma-separated)
    #[serde(default = "default_scopes")]
    pub scopes: String,

    /// Pre-issued bearer token used by the static token provider
    pub access_token: Option<Secret<String>>,
}

impl AuthConfig {
    /// Get scopes as a vector
    pub fn scopes_list(&self) -> Vec<String> {
        self.scopes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate authentication configuration
    ///
    /// Scheduling needs both profile and calendar scopes. In production the
    /// authority must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.authority.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUTHORITY"));
        }
        if self.redirect_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__REDIRECT_URL"));
        }
        if self.access_token.is_none() {
            return Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN"));
        }

        let scopes = self.scopes_list();
        for required in [SCOPE_USER_READ, SCOPE_CALENDARS_READ_WRITE] {
            if !scopes.iter().any(|s| s == required) {
                return Err(ValidationError::MissingScope(required));
            }
        }

        if *environment == Environment::Production && !self.authority.starts_with("https://") {
            return Err(ValidationError::AuthorityMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority: default_authority(),
            client_id: String::new(),
            client_secret: None,
            redirect_url: default_redirect_url(),
            scopes: default_scopes(),
            access_token: None,
        }
    }
}

fn default_authority() -> String {
    "https://login.microsoftonline.com/common".to_string()
}

fn default_redirect_url() -> String {
    "http://localhost:3978/callback".to_string()
}

fn default_scopes() -> String {
    format!("{},{}", SCOPE_USER_READ, SCOPE_CALENDARS_READ_WRITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> AuthConfig {
        AuthConfig {
            access_token: Some(Secret::new("token".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.authority, "https://login.microsoftonline.com/common");
        assert_eq!(config.scopes_list(), vec!["User.Read", "Calendars.ReadWrite"]);
    }

    #[test]
    fn test_scopes_list_trims_and_skips_blanks() {
        let config = AuthConfig {
            scopes: " User.Read , ,Calendars.ReadWrite,".to_string(),
            ..Default::default()
        };
        assert_eq!(config.scopes_list(), vec!["User.Read", "Calendars.ReadWrite"]);
    }

    #[test]
    fn test_validation_missing_token() {
        let config = AuthConfig::default();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN"))
        ));
    }

    #[test]
    fn test_validation_missing_calendar_scope() {
        let config = AuthConfig {
            scopes: "User.Read".to_string(),
            ..with_token()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingScope("Calendars.ReadWrite"))
        ));
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            authority: "http://login.example.com".to_string(),
            ..with_token()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_token().validate(&Environment::Production).is_ok());
    }
}
