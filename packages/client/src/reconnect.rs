//! When to give up on a dropped connection.

use std::time::Duration;

use crate::error::ClientError;

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RECONNECT_ATTEMPTS,
            interval: RECONNECT_INTERVAL,
        }
    }
}

impl ReconnectPolicy {
    /// Whether to connect again after `failures` consecutive failed sessions.
    ///
    /// Only a lost or refused connection is retried. History and command
    /// errors never end a session, so they never reach here in practice.
    pub fn should_retry(&self, error: &ClientError, failures: u32) -> bool {
        matches!(error, ClientError::ConnectionError(_)) && failures < self.max_attempts
    }
}
