//! Strongly-typed identifier value objects.

use std::fmt;
use uuid::Uuid;

/// Unique identifier for one scheduling conversation.
///
/// Only used to correlate log lines; nothing is persisted under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(Uuid);

impl ConversationId {
    /// Creates a new random ConversationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(ConversationId::new(), ConversationId::new());
    }

    #[test]
    fn displays_as_hyphenated_uuid() {
        let shown = ConversationId::new().to_string();
        assert_eq!(shown.len(), 36);
        assert!(Uuid::parse_str(&shown).is_ok());
    }
}
