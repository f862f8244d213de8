//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Access token providers (static, mock)
//! - `calendar` - Calendar backends (Microsoft Graph, mock)
//! - `transport` - Conversation channels (console, scripted)

pub mod auth;
pub mod calendar;
pub mod transport;
