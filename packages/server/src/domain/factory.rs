//! Identifier factories.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::{
    error::ValueObjectError,
    value_object::{ConnectionId, MessageId},
};

/// Generates connection ids for newly accepted connections.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}

/// Issues strictly increasing message ids, starting at 1.
#[derive(Debug)]
pub struct MessageIdFactory {
    next: AtomicU64,
}

impl Default for MessageIdFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageIdFactory {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> MessageId {
        MessageId::new(self.next.fetch_add(1, Ordering::SeqCst))
    }
}
