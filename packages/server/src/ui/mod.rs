//! UI layer: axum server, WebSocket and HTTP handlers.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;
