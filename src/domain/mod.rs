//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, credentials, errors, state machine trait)
//! - `scheduling` - Meeting-scheduling session, stages, validators and time slots

pub mod foundation;
pub mod scheduling;
