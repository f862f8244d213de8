//! Calendar adapters.
//!
//! Implementations of the `CalendarService` and `UserDirectory` ports:
//!
//! - `graph` - Microsoft Graph REST implementation
//! - `mock` - Scripted implementation for tests

mod graph;
mod mock;

pub use graph::{GraphCalendarService, GraphConfig};
pub use mock::MockCalendarService;
