//! Conversation transports.
//!
//! - `console` - stdin/stdout, one line per message
//! - `scripted` - in-memory queue for tests

mod console;
mod scripted;

pub use console::ConsoleTransport;
pub use scripted::ScriptedTransport;
