//! Read-Receipt Tracker: per-message set of identities who have seen it.
//!
//! Keyed by message id rather than embedded in messages, since public and
//! private messages share the id space and private ones are never logged.

use std::collections::HashMap;

use super::value_object::{Identity, MessageId};

#[derive(Debug, Clone, Default)]
pub struct ReadReceiptTracker {
    readers: HashMap<MessageId, Vec<Identity>>,
}

impl ReadReceiptTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `identity` has read the message.
    ///
    /// Returns the full reader set when it changed, `None` if already recorded.
    pub fn mark_read(
        &mut self,
        message_id: MessageId,
        identity: Identity,
    ) -> Option<Vec<Identity>> {
        let readers = self.readers.entry(message_id).or_default();
        if readers.contains(&identity) {
            return None;
        }
        readers.push(identity);
        Some(readers.clone())
    }

    pub fn readers(&self, message_id: MessageId) -> Vec<Identity> {
        self.readers.get(&message_id).cloned().unwrap_or_default()
    }

    /// Drop the receipts of a message that no longer exists.
    pub fn forget(&mut self, message_id: MessageId) {
        self.readers.remove(&message_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_mark_read_returns_full_reader_set() {
        // テスト項目: 既読登録すると該当メッセージの全既読者が返される
        // given (前提条件):
        let mut tracker = ReadReceiptTracker::new();
        tracker.mark_read(MessageId::new(1), identity("alice"));

        // when (操作):
        let readers = tracker.mark_read(MessageId::new(1), identity("bob"));

        // then (期待する結果):
        assert_eq!(readers, Some(vec![identity("alice"), identity("bob")]));
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        // テスト項目: 同じユーザーの二重既読は記録も通知もされない
        // given (前提条件):
        let mut tracker = ReadReceiptTracker::new();
        tracker.mark_read(MessageId::new(1), identity("alice"));

        // when (操作):
        let second = tracker.mark_read(MessageId::new(1), identity("alice"));

        // then (期待する結果):
        assert_eq!(second, None);
        assert_eq!(tracker.readers(MessageId::new(1)).len(), 1);
    }

    #[test]
    fn test_forget_drops_receipts() {
        // テスト項目: forget したメッセージの既読情報は消える
        // given (前提条件):
        let mut tracker = ReadReceiptTracker::new();
        tracker.mark_read(MessageId::new(1), identity("alice"));

        // when (操作):
        tracker.forget(MessageId::new(1));

        // then (期待する結果):
        assert!(tracker.readers(MessageId::new(1)).is_empty());
    }
}
