//! Typing Tracker: identities currently composing a message.
//!
//! Start/stop timing belongs to the client; this store only records the flag.

use super::value_object::{ConnectionId, Identity};

#[derive(Debug, Clone, Default)]
pub struct TypingTracker {
    entries: Vec<(ConnectionId, Identity)>,
}

impl TypingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_typing(&mut self, connection_id: ConnectionId, identity: Identity, is_typing: bool) {
        let position = self
            .entries
            .iter()
            .position(|(id, _)| id == &connection_id);

        match (is_typing, position) {
            (true, Some(index)) => self.entries[index].1 = identity,
            (true, None) => self.entries.push((connection_id, identity)),
            (false, Some(index)) => {
                self.entries.remove(index);
            }
            (false, None) => {}
        }
    }

    /// Drop any entry for the connection. Returns whether one existed.
    pub fn clear(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| id != connection_id);
        self.entries.len() != before
    }

    pub fn currently_typing(&self) -> Vec<Identity> {
        self.entries
            .iter()
            .map(|(_, identity)| identity.clone())
            .collect()
    }
}
