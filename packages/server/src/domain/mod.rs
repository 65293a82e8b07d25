//! Domain layer: value objects, entities, the chat stores, and the traits the
//! outer layers implement.

pub mod chat_room;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_log;
pub mod message_pusher;
pub mod presence;
pub mod reaction;
pub mod read_receipt;
pub mod repository;
pub mod typing;
pub mod value_object;

pub use chat_room::{ChatRoom, Departure};
pub use entity::{ChatMessage, FilePayload, MessageBody, MessageKind, Recipient, Session};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::ChatEvent;
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use message_log::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_PAGE_LIMIT, MessageLog, MessagePage, PageRequest,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use presence::PresenceRegistry;
pub use reaction::{ReactionAggregator, ReactionOutcome, Reactions};
pub use read_receipt::ReadReceiptTracker;
pub use repository::ChatRepository;
pub use typing::TypingTracker;
pub use value_object::{
    ANONYMOUS_IDENTITY, ConnectionId, Identity, MessageId, MessageText, ReactionSymbol, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
