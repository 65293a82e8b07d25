//! Domain entities: sessions and chat messages.

use super::{
    reaction::Reactions,
    value_object::{ConnectionId, Identity, MessageId, MessageText, Timestamp},
};

/// One live connection paired with a chosen display identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub identity: Identity,
}

impl Session {
    pub fn new(connection_id: ConnectionId, identity: Identity) -> Self {
        Self {
            connection_id,
            identity,
        }
    }
}

/// Kind of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    File,
    PrivateText,
    PrivateFile,
}

impl MessageKind {
    pub fn is_private(&self) -> bool {
        matches!(self, MessageKind::PrivateText | MessageKind::PrivateFile)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, MessageKind::File | MessageKind::PrivateFile)
    }
}

/// Opaque file payload with its declared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// Encoded file contents, passed through untouched (e.g. a data URL)
    pub data: String,
    pub media_type: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(MessageText),
    File(FilePayload),
}

/// Designated recipient of a private message.
///
/// `identity` is `None` when the target connection had no session at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub connection_id: ConnectionId,
    pub identity: Option<Identity>,
}

/// A chat event record. Immutable once created, except for its reactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub kind: MessageKind,
    pub sender: Identity,
    pub sender_id: ConnectionId,
    pub recipient: Option<Recipient>,
    pub body: MessageBody,
    pub created_at: Timestamp,
    pub reactions: Reactions,
}

impl ChatMessage {
    /// Build a public message; the kind follows the body.
    pub fn public(
        id: MessageId,
        sender: Identity,
        sender_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Self {
        let kind = match body {
            MessageBody::Text(_) => MessageKind::Text,
            MessageBody::File(_) => MessageKind::File,
        };
        Self {
            id,
            kind,
            sender,
            sender_id,
            recipient: None,
            body,
            created_at,
            reactions: Reactions::new(),
        }
    }

    /// Build a private message addressed to `recipient`.
    pub fn private(
        id: MessageId,
        sender: Identity,
        sender_id: ConnectionId,
        recipient: Recipient,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Self {
        let kind = match body {
            MessageBody::Text(_) => MessageKind::PrivateText,
            MessageBody::File(_) => MessageKind::PrivateFile,
        };
        Self {
            id,
            kind,
            sender,
            sender_id,
            recipient: Some(recipient),
            body,
            created_at,
            reactions: Reactions::new(),
        }
    }

    pub fn is_private(&self) -> bool {
        self.kind.is_private()
    }

    /// Whether the given connection may see this message.
    pub fn is_visible_to(&self, connection_id: &ConnectionId) -> bool {
        match &self.recipient {
            None => true,
            Some(recipient) => {
                &self.sender_id == connection_id || &recipient.connection_id == connection_id
            }
        }
    }
}
