//! Conversation transport port.
//!
//! The channel that carries user messages in and bot messages out. Delivery
//! guarantees (dedup, at-least-once) belong to the transport, not the core.

use async_trait::async_trait;
use thiserror::Error;

/// Transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The channel is closed and cannot carry further messages.
    #[error("transport closed")]
    Closed,

    /// Reading or writing failed.
    #[error("transport I/O error: {0}")]
    Io(String),
}

/// Bidirectional text channel for one conversation.
#[async_trait]
pub trait ConversationTransport: Send {
    /// Sends one outbound message to the user.
    async fn send(&mut self, text: &str) -> Result<(), TransportError>;

    /// Waits for the next inbound message. `Ok(None)` means the user left.
    async fn receive(&mut self) -> Result<Option<String>, TransportError>;
}
