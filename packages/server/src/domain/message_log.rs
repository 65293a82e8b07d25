//! Message Log: bounded, append-only store of public chat messages.

use std::collections::VecDeque;

use super::{entity::ChatMessage, error::RepositoryError, value_object::MessageId};

/// Default number of public messages retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default page size when the caller does not supply a usable `limit`.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Pagination window, counted backward from the newest message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Coerce raw query values.
    ///
    /// Missing or non-numeric values take their defaults; negative values clamp to 0.
    pub fn from_raw(offset: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            offset: coerce_non_negative(offset, 0),
            limit: coerce_non_negative(limit, DEFAULT_PAGE_LIMIT),
        }
    }
}

fn coerce_non_negative(raw: Option<&str>, default: usize) -> usize {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(value)) => usize::try_from(value.max(0)).unwrap_or(default),
        _ => default,
    }
}

/// One page of history plus the log size at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    /// Oldest to newest within the window
    pub messages: Vec<ChatMessage>,
    pub total: usize,
    pub request: PageRequest,
}

/// Result of appending to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub stored: ChatMessage,
    /// Ids pushed out of the log by this append (FIFO)
    pub evicted: Vec<MessageId>,
}

#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl MessageLog {
    /// Create a log holding at most `capacity` messages (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total(&self) -> usize {
        self.messages.len()
    }

    /// Append a public message at the tail, evicting the oldest beyond capacity.
    ///
    /// Arrival order is authoritative: ids are not inspected for ordering.
    pub fn append(&mut self, message: ChatMessage) -> Result<AppendOutcome, RepositoryError> {
        if message.is_private() {
            return Err(RepositoryError::PrivateMessageNotLoggable(
                message.id.value(),
            ));
        }

        self.messages.push_back(message.clone());

        let mut evicted = Vec::new();
        while self.messages.len() > self.capacity {
            if let Some(oldest) = self.messages.pop_front() {
                evicted.push(oldest.id);
            }
        }

        Ok(AppendOutcome {
            stored: message,
            evicted,
        })
    }

    /// Return the window `[total - offset - limit, total - offset)` clamped to `[0, total]`.
    pub fn page(&self, request: PageRequest) -> MessagePage {
        let total = self.messages.len();
        let end = total.saturating_sub(request.offset);
        let start = end.saturating_sub(request.limit);

        MessagePage {
            messages: self.messages.range(start..end).cloned().collect(),
            total,
            request,
        }
    }

    pub fn find(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn find_mut(&mut self, id: MessageId) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|message| message.id == id)
    }
}
