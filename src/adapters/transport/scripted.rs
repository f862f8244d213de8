//! In-memory transport for tests.
//!
//! Inbound messages are queued up front; outbound messages are recorded.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::ports::{ConversationTransport, TransportError};

/// Transport fed from a fixed script.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    inbound: VecDeque<String>,
    sent: Vec<String>,
    closed: bool,
}

impl ScriptedTransport {
    /// Creates a transport that will deliver `inbound` in order, then report
    /// the user as gone.
    pub fn new<I, S>(inbound: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inbound: inbound.into_iter().map(Into::into).collect(),
            sent: Vec::new(),
            closed: false,
        }
    }

    /// Makes subsequent sends fail as if the channel had dropped.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Everything sent so far.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Inbound messages not yet received.
    pub fn remaining(&self) -> usize {
        self.inbound.len()
    }
}

#[async_trait]
impl ConversationTransport for ScriptedTransport {
    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.sent.push(text.to_string());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<String>, TransportError> {
        Ok(self.inbound.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_script_then_none() {
        let mut transport = ScriptedTransport::new(["a", "b"]);
        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("a"));
        assert_eq!(transport.remaining(), 1);
        assert_eq!(transport.receive().await.unwrap().as_deref(), Some("b"));
        assert_eq!(transport.receive().await.unwrap(), None);
    }

    #[tokio::test]
    async fn records_sent_messages() {
        let mut transport = ScriptedTransport::default();
        transport.send("hi").await.unwrap();
        assert_eq!(transport.sent(), ["hi".to_string()]);
    }

    #[tokio::test]
    async fn closed_transport_rejects_sends() {
        let mut transport = ScriptedTransport::default();
        transport.close();
        assert_eq!(transport.send("hi").await, Err(TransportError::Closed));
    }
}
