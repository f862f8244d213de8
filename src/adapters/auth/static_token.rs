//! Static token provider.
//!
//! Hands out a pre-issued bearer token from configuration. Suitable for
//! console sessions and local development where the sign-in handshake has
//! already happened out of band.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{AccessToken, AuthError};
use crate::ports::{AccessTokenProvider, AuthRequest};

/// Returns one configured token for every request its scopes cover.
pub struct StaticTokenProvider {
    token: Secret<String>,
    granted_scopes: Vec<String>,
}

impl StaticTokenProvider {
    /// Creates a provider for `token`, which was issued with `granted_scopes`.
    pub fn new<I, S>(token: Secret<String>, granted_scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token,
            granted_scopes: granted_scopes.into_iter().map(Into::into).collect(),
        }
    }

    fn missing_scopes<'a>(&self, request: &'a AuthRequest) -> Vec<&'a str> {
        request
            .scopes
            .iter()
            .filter(|wanted| {
                !self
                    .granted_scopes
                    .iter()
                    .any(|granted| granted.eq_ignore_ascii_case(wanted))
            })
            .map(String::as_str)
            .collect()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn acquire(&self, request: &AuthRequest) -> Result<AccessToken, AuthError> {
        let token = self.token.expose_secret();
        if token.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let missing = self.missing_scopes(request);
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "configured token lacks requested scopes");
            return Err(AuthError::MissingScopes(missing.join(",")));
        }

        Ok(AccessToken::new(token.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(scopes: &[&str]) -> StaticTokenProvider {
        StaticTokenProvider::new(Secret::new("abc".to_string()), scopes.iter().copied())
    }

    #[tokio::test]
    async fn returns_token_when_scopes_covered() {
        let provider = provider(&["User.Read", "Calendars.ReadWrite"]);
        let token = provider
            .acquire(&AuthRequest::for_scheduling("http://localhost/cb"))
            .await
            .unwrap();
        assert_eq!(token.expose(), "abc");
    }

    #[tokio::test]
    async fn scope_match_ignores_case() {
        let provider = provider(&["user.read", "calendars.readwrite"]);
        let request = AuthRequest::for_scheduling("http://localhost/cb");
        assert!(provider.acquire(&request).await.is_ok());
    }

    #[tokio::test]
    async fn reports_missing_scopes() {
        let provider = provider(&["User.Read"]);
        let err = provider
            .acquire(&AuthRequest::for_scheduling("http://localhost/cb"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MissingScopes("Calendars.ReadWrite".into()));
        assert!(err.requires_reauthentication());
    }

    #[test]
    fn missing_scopes_borrow_from_the_request() {
        let request = AuthRequest::for_scheduling("http://localhost/cb");
        let missing = {
            let provider = provider(&["calendars.readwrite"]);
            provider.missing_scopes(&request)
        };
        assert_eq!(missing, vec!["User.Read"]);
    }

    #[tokio::test]
    async fn blank_token_is_invalid() {
        let provider = StaticTokenProvider::new(Secret::new("  ".to_string()), ["User.Read"]);
        let request = AuthRequest::new(["User.Read"], "http://localhost/cb");
        assert!(matches!(
            provider.acquire(&request).await,
            Err(AuthError::InvalidToken)
        ));
    }
}
