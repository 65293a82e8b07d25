//! Conversion logic between DTOs and domain entities.

use hiroba_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatEvent, ChatMessage, MessageBody, MessageKind, MessagePage, Session};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<MessageKind> for dto::MessageKindDto {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Text => Self::Text,
            MessageKind::File => Self::File,
            MessageKind::PrivateText => Self::PrivateText,
            MessageKind::PrivateFile => Self::PrivateFile,
        }
    }
}

impl From<Session> for dto::UserDto {
    fn from(session: Session) -> Self {
        Self {
            username: session.identity.into_string(),
            id: session.connection_id.into_string(),
        }
    }
}

impl From<ChatMessage> for dto::MessageDto {
    fn from(model: ChatMessage) -> Self {
        let (message, file, file_type, file_name) = match model.body {
            MessageBody::Text(text) => (Some(text.into_string()), None, None, None),
            MessageBody::File(payload) => (
                None,
                Some(payload.data),
                Some(payload.media_type),
                Some(payload.file_name),
            ),
        };
        let (receiver, receiver_id) = match model.recipient {
            Some(recipient) => (
                recipient.identity.map(|identity| identity.into_string()),
                Some(recipient.connection_id.into_string()),
            ),
            None => (None, None),
        };
        let reactions = model
            .reactions
            .iter()
            .map(|(symbol, reactors)| {
                (
                    symbol.as_str().to_string(),
                    reactors.iter().map(|r| r.as_str().to_string()).collect(),
                )
            })
            .collect();

        Self {
            id: model.id.value(),
            kind: model.kind.into(),
            sender: model.sender.into_string(),
            sender_id: model.sender_id.into_string(),
            receiver,
            receiver_id,
            message,
            file,
            file_type,
            file_name,
            is_private: model.kind.is_private(),
            timestamp: timestamp_to_rfc3339(model.created_at.value()),
            timestamp_millis: model.created_at.value(),
            reactions,
        }
    }
}

impl From<ChatEvent> for dto::ServerEvent {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::Connected { connection_id } => Self::Connected {
                connection_id: connection_id.into_string(),
            },
            ChatEvent::PresenceList(sessions) => Self::UserList {
                users: sessions.into_iter().map(Into::into).collect(),
            },
            ChatEvent::Joined(session) => Self::UserJoined(session.into()),
            ChatEvent::Left(session) => Self::UserLeft(session.into()),
            ChatEvent::NewMessage(message) => Self::ReceiveMessage(message.into()),
            ChatEvent::PrivateMessage(message) => Self::PrivateMessage(message.into()),
            ChatEvent::FileMessage(message) => Self::FileMessage(message.into()),
            ChatEvent::Reaction {
                message_id,
                symbol,
                identity,
            } => Self::Reaction {
                message_id: message_id.value(),
                emoji: symbol.as_str().to_string(),
                user: identity.into_string(),
            },
            ChatEvent::ReadReceipt {
                message_id,
                readers,
            } => Self::ReadReceipt {
                message_id: message_id.value(),
                readers: readers.into_iter().map(|r| r.into_string()).collect(),
            },
            ChatEvent::TypingUsers(identities) => Self::TypingUsers {
                users: identities.into_iter().map(|i| i.into_string()).collect(),
            },
        }
    }
}

impl From<MessagePage> for http::MessagesPageDto {
    fn from(page: MessagePage) -> Self {
        Self {
            messages: page.messages.into_iter().map(Into::into).collect(),
            total: page.total,
            offset: page.request.offset,
            limit: page.request.limit,
        }
    }
}
