//! Authentication adapters.
//!
//! Implementations of the `AccessTokenProvider` port:
//!
//! - `static_token` - Pre-issued token from configuration
//! - `mock` - Test implementation that doesn't require an identity provider

mod mock;
mod static_token;

pub use mock::MockTokenProvider;
pub use static_token::StaticTokenProvider;
