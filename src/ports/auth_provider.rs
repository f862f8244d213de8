//! Access token provider port.
//!
//! The identity handshake (sign-in card, redirect, code exchange) is owned by
//! whatever implements this port. The scheduling conversation only needs the
//! resulting bearer token, and it needs it before the first stage.
//!
//! # Example
//!
//! ```ignore
//! let request = AuthRequest::new(["User.Read", "Calendars.ReadWrite"], redirect_url);
//! let token = provider.acquire(&request).await?;
//! let session = MeetingSession::new(token);
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, AuthError};

/// Scope needed to read the signed-in user's profile.
pub const SCOPE_USER_READ: &str = "User.Read";

/// Scope needed to search availability and create events.
pub const SCOPE_CALENDARS_READ_WRITE: &str = "Calendars.ReadWrite";

/// What the conversation asks the identity provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    /// Delegated permissions the token must carry.
    pub scopes: Vec<String>,
    /// Where the provider sends the user after sign-in.
    pub redirect_url: String,
}

impl AuthRequest {
    /// Creates a request for the given scopes.
    pub fn new<I, S>(scopes: I, redirect_url: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
            redirect_url: redirect_url.into(),
        }
    }

    /// Scopes a scheduling conversation needs: profile read plus calendar read/write.
    pub fn for_scheduling(redirect_url: impl Into<String>) -> Self {
        Self::new([SCOPE_USER_READ, SCOPE_CALENDARS_READ_WRITE], redirect_url)
    }
}

/// Produces an access token for the user on the other end of a conversation.
///
/// # Contract
///
/// Implementations must:
/// - Return a token covering every requested scope, or an error
/// - Return `AuthError::MissingScopes` rather than a narrower token
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Runs (or reuses) the sign-in and returns a bearer token.
    async fn acquire(&self, request: &AuthRequest) -> Result<AccessToken, AuthError>;
}
