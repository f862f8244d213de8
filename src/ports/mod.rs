//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the scheduling domain and the outside world. Adapters implement these ports.
//!
//! - `AccessTokenProvider` - identity handshake producing a bearer token
//! - `CalendarService` - availability search and event creation
//! - `UserDirectory` - signed-in user's profile
//! - `ConversationTransport` - inbound/outbound message channel

mod auth_provider;
mod calendar_service;
mod transport;

pub use auth_provider::{
    AccessTokenProvider, AuthRequest, SCOPE_CALENDARS_READ_WRITE, SCOPE_USER_READ,
};
pub use calendar_service::{
    CalendarError, CalendarService, CreatedEvent, MeetingTimeCandidate, MeetingTimeQuery,
    NewCalendarEvent, SearchWindow, UserDirectory,
};
pub use transport::{ConversationTransport, TransportError};
