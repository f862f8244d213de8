//! Mock token provider for testing.
//!
//! ```ignore
//! let provider = MockTokenProvider::new().with_token("test-token");
//! let token = provider.acquire(&AuthRequest::for_scheduling(url)).await?;
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, AuthError};
use crate::ports::{AccessTokenProvider, AuthRequest};

/// Mock access token provider.
///
/// Returns the configured token, or the forced error, and records requests.
#[derive(Debug, Clone)]
pub struct MockTokenProvider {
    token: String,
    force_error: Arc<Mutex<Option<AuthError>>>,
    requests: Arc<Mutex<Vec<AuthRequest>>>,
}

impl Default for MockTokenProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTokenProvider {
    /// Creates a provider returning `"mock-access-token"`.
    pub fn new() -> Self {
        Self {
            token: "mock-access-token".to_string(),
            force_error: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the token to return.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Forces every acquisition to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.lock().unwrap() = Some(error);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<AuthRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessTokenProvider for MockTokenProvider {
    async fn acquire(&self, request: &AuthRequest) -> Result<AccessToken, AuthError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(error) = self.force_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(AccessToken::new(self.token.clone()))
    }
}
