//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    domain::PageRequest,
    infrastructure::dto::{
        http::{MessagesPageDto, MessagesQuery},
        websocket::UserDto,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Page through the message log, newest first.
///
/// Parameters are taken as raw strings so malformed values fall back to defaults
/// instead of rejecting the request.
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessagesQuery>,
) -> Json<MessagesPageDto> {
    let request = PageRequest::from_raw(query.offset.as_deref(), query.limit.as_deref());
    let page = state.get_messages_usecase.execute(request).await;

    // Domain Model から DTO への変換
    Json(page.into())
}

/// Current sessions in join order
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<Vec<UserDto>> {
    let sessions = state.get_sessions_usecase.execute().await;
    Json(sessions.into_iter().map(UserDto::from).collect())
}
