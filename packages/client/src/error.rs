//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Fetching message history over HTTP failed
    #[error("Failed to fetch history: {0}")]
    HistoryFetch(String),

    /// A slash command could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
