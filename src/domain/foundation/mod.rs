//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the scheduling domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod state_machine;

pub use auth::{AccessToken, AuthError, UserProfile};
pub use errors::{ErrorCode, ValidationError};
pub use ids::ConversationId;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
