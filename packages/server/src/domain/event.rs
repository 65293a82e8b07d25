//! Outbound chat events produced by the router.

use super::{
    entity::{ChatMessage, Session},
    value_object::{ConnectionId, Identity, MessageId, ReactionSymbol},
};

/// Everything the server can tell a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Sent once to a new connection so the client learns its own id.
    Connected { connection_id: ConnectionId },
    PresenceList(Vec<Session>),
    Joined(Session),
    Left(Session),
    NewMessage(ChatMessage),
    PrivateMessage(ChatMessage),
    FileMessage(ChatMessage),
    Reaction {
        message_id: MessageId,
        symbol: ReactionSymbol,
        identity: Identity,
    },
    ReadReceipt {
        message_id: MessageId,
        readers: Vec<Identity>,
    },
    TypingUsers(Vec<Identity>),
}
