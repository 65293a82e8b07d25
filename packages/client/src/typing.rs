//! Local typing-indicator debouncer.
//!
//! The first edit flips the flag on; a quiet period with no edits, or sending a
//! message, flips it off. Time is passed in so the logic stays pure.

use std::time::{Duration, Instant};

/// Quiet period after which typing is reported as stopped.
pub const TYPING_QUIET_PERIOD: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone)]
pub struct TypingDebouncer {
    quiet_period: Duration,
    last_edit: Option<Instant>,
}

impl Default for TypingDebouncer {
    fn default() -> Self {
        Self::new(TYPING_QUIET_PERIOD)
    }
}

impl TypingDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            last_edit: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Record an edit. Returns `Some(true)` when typing starts.
    pub fn on_edit(&mut self, now: Instant) -> Option<bool> {
        let started = self.last_edit.is_none();
        self.last_edit = Some(now);
        started.then_some(true)
    }

    /// Returns `Some(false)` once the quiet period has elapsed since the last edit.
    pub fn poll(&mut self, now: Instant) -> Option<bool> {
        match self.last_edit {
            Some(last) if now.saturating_duration_since(last) >= self.quiet_period => {
                self.last_edit = None;
                Some(false)
            }
            _ => None,
        }
    }

    /// Sending a message ends typing immediately.
    pub fn on_send(&mut self) -> Option<bool> {
        self.last_edit.take().map(|_| false)
    }
}
