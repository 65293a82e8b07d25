//! Message formatting utilities for client display.

use hiroba_server::infrastructure::dto::websocket::{MessageDto, UserDto};
use hiroba_shared::time::timestamp_to_clock_time;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the presence list, marking this connection as "(me)"
    pub fn format_user_list(users: &[UserDto], own_connection_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str("Online:\n");

        if users.is_empty() {
            output.push_str("(nobody has joined yet)\n");
        } else {
            for user in users {
                let me_suffix = if Some(user.id.as_str()) == own_connection_id {
                    " (me)"
                } else {
                    ""
                };
                output.push_str(&format!("{}{}\n", user.username, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    pub fn format_joined(user: &UserDto) -> String {
        format!("\n+ {} joined\n", user.username)
    }

    pub fn format_left(user: &UserDto) -> String {
        format!("\n- {} left\n", user.username)
    }

    /// Format one chat message with its id, reactions and readers.
    ///
    /// # Arguments
    ///
    /// * `message` - The message record
    /// * `readers` - Identities that have read the message
    pub fn format_message(message: &MessageDto, readers: &[String]) -> String {
        let private_suffix = if message.is_private { " (private)" } else { "" };
        let body = match (&message.message, &message.file_name) {
            (Some(text), _) => text.clone(),
            (None, Some(file_name)) => format!(
                "[file] {} ({})",
                file_name,
                message.file_type.as_deref().unwrap_or("unknown type")
            ),
            (None, None) => String::new(),
        };

        let mut output = format!(
            "\n[{}] #{} {}{}: {}\n",
            timestamp_to_clock_time(message.timestamp_millis),
            message.id,
            message.sender,
            private_suffix,
            body
        );

        if !message.reactions.is_empty() {
            let reactions: Vec<String> = message
                .reactions
                .iter()
                .map(|(emoji, users)| format!("{} {}", emoji, users.len()))
                .collect();
            output.push_str(&format!("    {}\n", reactions.join("  ")));
        }
        if !readers.is_empty() {
            output.push_str(&format!("    read by {}\n", readers.join(", ")));
        }
        output
    }

    /// One-line notice for a message from someone else.
    pub fn format_notice(message: &MessageDto) -> String {
        let title = if message.is_private {
            format!("{} (private)", message.sender)
        } else {
            message.sender.clone()
        };
        let summary = match (&message.message, &message.file_name) {
            (Some(text), _) => text.clone(),
            (None, Some(file_name)) => format!("Sent a file: {}", file_name),
            (None, None) => "New message".to_string(),
        };
        format!("\n* {} says: {}\n", title, summary)
    }

    pub fn format_reaction(message_id: u64, emoji: &str, user: &str) -> String {
        format!("\n{} reacted {} to #{}\n", user, emoji, message_id)
    }

    pub fn format_read_receipt(message_id: u64, readers: &[String]) -> String {
        format!("\n#{} read by {}\n", message_id, readers.join(", "))
    }

    /// Returns `None` when nobody else is typing.
    pub fn format_typing(users: &[String]) -> Option<String> {
        match users {
            [] => None,
            [one] => Some(format!("\n{} is typing...\n", one)),
            many => Some(format!("\n{} are typing...\n", many.join(", "))),
        }
    }

    pub fn format_history_loaded(count: usize, has_more: bool) -> String {
        let more = if has_more {
            " (/load for older)"
        } else {
            " (no older messages)"
        };
        format!("\n-- {} older message(s) loaded{} --\n", count, more)
    }

    pub fn format_view_switched(peer: Option<&UserDto>) -> String {
        match peer {
            Some(peer) => format!(
                "\n-- private thread with {} (/public to leave) --\n",
                peer.username
            ),
            None => "\n-- public feed --\n".to_string(),
        }
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  <text>                 send to the current view",
            "  /pm <user> [message]   open a private thread (and send)",
            "  /public                back to the public feed",
            "  /react <id> <emoji>    react to a message",
            "  /file <path>           send a file",
            "  /load                  load older messages",
            "  /search [term]         filter messages (no term clears)",
            "  /users                 show who is online",
            "  /quit                  leave",
            "",
        ]
        .join("\n")
    }
}
