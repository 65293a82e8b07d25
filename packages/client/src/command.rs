//! Parsing of input lines into client commands.

use crate::error::ClientError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, sent to the active view (public feed or private thread)
    Say(String),
    /// `/pm <user> [message]`: open a private thread, optionally sending a message
    Private {
        username: String,
        message: Option<String>,
    },
    /// `/public`: return to the public feed
    Public,
    /// `/react <message id> <emoji>`
    React { message_id: u64, emoji: String },
    /// `/file <path>`: send a file to the active view
    File { path: String },
    /// `/load`: fetch the next older page of history
    LoadOlder,
    /// `/search [term]`: filter messages; no term clears the filter
    Search(String),
    /// `/users`
    Users,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Say(line.to_string()));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        match name {
            "pm" => {
                let (username, message) = match args.split_once(char::is_whitespace) {
                    Some((username, message)) => (username, Some(message.trim().to_string())),
                    None => (args, None),
                };
                if username.is_empty() {
                    return Err(ClientError::InvalidCommand("usage: /pm <user> [message]".into()));
                }
                Ok(Command::Private {
                    username: username.to_string(),
                    message: message.filter(|m| !m.is_empty()),
                })
            }
            "public" => Ok(Command::Public),
            "react" => {
                let usage =
                    || ClientError::InvalidCommand("usage: /react <message id> <emoji>".into());
                let (id, emoji) = args.split_once(char::is_whitespace).ok_or_else(usage)?;
                let message_id = id.parse::<u64>().map_err(|_| usage())?;
                let emoji = emoji.trim();
                if emoji.is_empty() {
                    return Err(usage());
                }
                Ok(Command::React {
                    message_id,
                    emoji: emoji.to_string(),
                })
            }
            "file" => {
                if args.is_empty() {
                    return Err(ClientError::InvalidCommand("usage: /file <path>".into()));
                }
                Ok(Command::File {
                    path: args.to_string(),
                })
            }
            "load" => Ok(Command::LoadOlder),
            "search" => Ok(Command::Search(args.to_string())),
            "users" => Ok(Command::Users),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ClientError::InvalidCommand(format!("unknown command '/{}'", other))),
        }
    }
}
