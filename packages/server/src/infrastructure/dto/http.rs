//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::MessageDto;

/// Raw pagination query; values are coerced rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// Response of `GET /api/messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesPageDto {
    /// Oldest to newest within the window
    pub messages: Vec<MessageDto>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}
