//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by its `"type"` field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    UserJoin {
        username: String,
    },
    SendMessage {
        message: String,
    },
    Reaction {
        message_id: u64,
        emoji: String,
        /// Reacting identity; the sender's session identity when omitted
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
    },
    Read {
        message_id: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    Typing {
        is_typing: bool,
    },
    PrivateMessage {
        to: String,
        message: String,
    },
    SendFile {
        file: String,
        file_type: String,
        file_name: String,
        #[serde(default)]
        is_private: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        to: Option<String>,
    },
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Connected {
        connection_id: String,
    },
    UserList {
        users: Vec<UserDto>,
    },
    UserJoined(UserDto),
    UserLeft(UserDto),
    ReceiveMessage(MessageDto),
    PrivateMessage(MessageDto),
    FileMessage(MessageDto),
    Reaction {
        message_id: u64,
        emoji: String,
        user: String,
    },
    ReadReceipt {
        message_id: u64,
        readers: Vec<String>,
    },
    TypingUsers {
        users: Vec<String>,
    },
}

/// A session as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub username: String,
    /// Connection id
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKindDto {
    Text,
    File,
    PrivateText,
    PrivateFile,
}

/// A chat message record, carrying enough context to merge without a follow-up query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: u64,
    pub kind: MessageKindDto,
    pub sender: String,
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub is_private: bool,
    /// RFC 3339 (UTC)
    pub timestamp: String,
    pub timestamp_millis: i64,
    #[serde(default)]
    pub reactions: BTreeMap<String, Vec<String>>,
}
