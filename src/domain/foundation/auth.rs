//! Authentication types for the domain layer.
//!
//! The identity handshake itself lives behind the `AccessTokenProvider` port.
//! Whatever performs it hands the conversation an [`AccessToken`]; these
//! types carry no provider-specific detail.

use secrecy::{ExposeSecret, Secret};
use std::fmt;
use thiserror::Error;

/// Opaque bearer credential bound to the signed-in user.
///
/// The raw value is kept in a [`Secret`] so it never shows up in `Debug`
/// output or log lines.
#[derive(Clone)]
pub struct AccessToken(Secret<String>);

impl AccessToken {
    /// Wraps a raw bearer token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Secret::new(raw.into()))
    }

    /// Exposes the raw token for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Profile of the signed-in user, used for the greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name if the directory has one.
    pub display_name: Option<String>,

    /// Primary mail address, if known.
    pub mail: Option<String>,
}

impl UserProfile {
    /// Creates a new user profile.
    pub fn new(display_name: Option<String>, mail: Option<String>) -> Self {
        Self { display_name, mail }
    }

    /// Returns the display name, or mail address as fallback.
    pub fn greeting_name(&self) -> Option<&str> {
        self.display_name.as_deref().or(self.mail.as_deref())
    }
}

/// Authentication errors raised before a conversation reaches its first stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential is missing, malformed or was rejected.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The credential does not cover the scopes the conversation needs.
    #[error("Missing required scopes: {0}")]
    MissingScopes(String),

    /// The user abandoned or declined the sign-in.
    #[error("Sign-in was cancelled")]
    Cancelled,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::MissingScopes(_))
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
