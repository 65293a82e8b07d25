//! Terminal client for the Hiroba chat server.
//!
//! The pure parts (state reconciliation, command parsing, typing debounce and
//! formatting) are separate from the socket and terminal plumbing in
//! `session`, `input` and `runner`.

pub mod attachment;
pub mod command;
pub mod config;
pub mod error;
pub mod formatter;
pub mod history;
pub mod input;
pub mod reconciler;
pub mod reconnect;
pub mod runner;
pub mod session;
pub mod typing;
pub mod ui;

pub use config::ClientConfig;
pub use error::ClientError;
pub use reconnect::ReconnectPolicy;
pub use runner::run_client;
