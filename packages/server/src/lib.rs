//! Hiroba chat server library.
//!
//! Session, presence and message-routing engine behind the Hiroba WebSocket chat.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
