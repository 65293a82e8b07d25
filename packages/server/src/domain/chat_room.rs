//! ChatRoom aggregate: owns the five shared stores.
//!
//! Each method performs the complete state change for one inbound event, so a
//! caller holding a single lock around the room gets per-event atomicity.

use std::collections::HashSet;

use super::{
    entity::{ChatMessage, MessageBody, Recipient, Session},
    error::RepositoryError,
    factory::MessageIdFactory,
    message_log::{MessageLog, MessagePage, PageRequest},
    presence::PresenceRegistry,
    reaction::{ReactionAggregator, ReactionOutcome},
    read_receipt::ReadReceiptTracker,
    typing::TypingTracker,
    value_object::{ConnectionId, Identity, MessageId, ReactionSymbol, Timestamp},
};

/// State changes caused by a connection going away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// The session that left, if the connection had joined
    pub departed: Option<Session>,
    pub sessions: Vec<Session>,
    pub typing: Vec<Identity>,
}

#[derive(Debug)]
pub struct ChatRoom {
    presence: PresenceRegistry,
    log: MessageLog,
    typing: TypingTracker,
    receipts: ReadReceiptTracker,
    message_ids: MessageIdFactory,
    /// Ids issued to private messages, which never enter the log
    private_ids: HashSet<MessageId>,
}

impl Default for ChatRoom {
    fn default() -> Self {
        Self::new(super::message_log::DEFAULT_HISTORY_CAPACITY)
    }
}

impl ChatRoom {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            presence: PresenceRegistry::new(),
            log: MessageLog::new(history_capacity),
            typing: TypingTracker::new(),
            receipts: ReadReceiptTracker::new(),
            message_ids: MessageIdFactory::new(),
            private_ids: HashSet::new(),
        }
    }

    pub fn join(&mut self, connection_id: ConnectionId, identity: Identity) -> Vec<Session> {
        self.presence.join(connection_id, identity);
        self.presence.list()
    }

    pub fn leave(&mut self, connection_id: &ConnectionId) -> Departure {
        let departed = self.presence.leave(connection_id);
        self.typing.clear(connection_id);
        Departure {
            departed,
            sessions: self.presence.list(),
            typing: self.typing.currently_typing(),
        }
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.presence.list()
    }

    pub fn session(&self, connection_id: &ConnectionId) -> Option<Session> {
        self.presence.get(connection_id).cloned()
    }

    pub fn resolve(&self, connection_id: &ConnectionId) -> Identity {
        self.presence.resolve(connection_id)
    }

    /// Create a public message from the connection and append it to the log.
    pub fn post_public(
        &mut self,
        sender_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let sender = self.presence.resolve(&sender_id);
        let message = ChatMessage::public(
            self.message_ids.next_id(),
            sender,
            sender_id,
            body,
            created_at,
        );

        let outcome = self.log.append(message)?;
        for evicted in outcome.evicted {
            self.receipts.forget(evicted);
        }
        Ok(outcome.stored)
    }

    /// Create a private message without logging it.
    pub fn compose_private(
        &mut self,
        sender_id: ConnectionId,
        recipient_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> ChatMessage {
        let sender = self.presence.resolve(&sender_id);
        let recipient = Recipient {
            identity: self
                .presence
                .get(&recipient_id)
                .map(|session| session.identity.clone()),
            connection_id: recipient_id,
        };
        let id = self.message_ids.next_id();
        self.private_ids.insert(id);
        ChatMessage::private(
            id,
            sender,
            sender_id,
            recipient,
            body,
            created_at,
        )
    }

    pub fn page(&self, request: PageRequest) -> MessagePage {
        self.log.page(request)
    }

    pub fn react(
        &mut self,
        message_id: MessageId,
        symbol: ReactionSymbol,
        identity: Identity,
    ) -> ReactionOutcome {
        ReactionAggregator::react(&mut self.log, message_id, symbol, identity)
    }

    pub fn mark_read(
        &mut self,
        message_id: MessageId,
        identity: Identity,
    ) -> Option<Vec<Identity>> {
        if !self.is_readable(message_id) {
            return None;
        }
        self.receipts.mark_read(message_id, identity)
    }

    /// Logged public messages and issued private ones can be read; evicted or
    /// unknown ids cannot.
    fn is_readable(&self, message_id: MessageId) -> bool {
        self.log.find(message_id).is_some() || self.private_ids.contains(&message_id)
    }

    /// Update the typing flag of a joined connection.
    ///
    /// Returns the current typing identities, or `None` if the connection has not joined.
    pub fn set_typing(
        &mut self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Option<Vec<Identity>> {
        let identity = self.presence.get(&connection_id)?.identity.clone();
        self.typing.set_typing(connection_id, identity, is_typing);
        Some(self.typing.currently_typing())
    }

    pub fn readers(&self, message_id: MessageId) -> Vec<Identity> {
        self.receipts.readers(message_id)
    }
}
