//! Domain error types.

use thiserror::Error;

/// Validation failures when constructing value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("message text must not be empty")]
    EmptyMessage,

    #[error("reaction symbol must not be empty")]
    EmptyReactionSymbol,
}

/// Failures raised by the chat stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Private messages are delivered point-to-point and never logged.
    #[error("private message {0} cannot be appended to the shared log")]
    PrivateMessageNotLoggable(u64),
}

/// Failures raised while pushing events to connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),

    #[error("failed to serialize event: {0}")]
    Serialization(String),
}
