//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory, FilePayload, MessageId},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: events routed to this connection (via rx channel)
/// are written to its WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to assign connection id: {}", e);
            return;
        }
    };

    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    // Registers the channel and queues `connected` + the current user list
    if let Err(e) = state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        tracing::error!("Failed to greet connection '{}': {}", connection_id, e);
    }
    tracing::info!("Connection '{}' established", connection_id);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Inbound events from one connection are handled sequentially, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatch(&state_clone, &connection_id_clone, event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Dropping malformed frame from '{}': {}",
                            connection_id_clone,
                            e
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state
        .disconnect_client_usecase
        .execute(connection_id.clone())
        .await
    {
        Ok(_) => tracing::info!("Connection '{}' closed", connection_id),
        Err(e) => tracing::warn!(
            "Failed to notify departure of '{}': {}",
            connection_id,
            e
        ),
    }
}

/// Route one inbound event to its use case.
///
/// Failures are logged and never surfaced to the client.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, event: ClientEvent) {
    let connection_id = connection_id.clone();

    match event {
        ClientEvent::UserJoin { username } => {
            if let Err(e) = state.join_chat_usecase.execute(connection_id.clone(), username).await {
                tracing::warn!("Ignoring join from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::SendMessage { message } => {
            if let Err(e) = state
                .send_message_usecase
                .execute(connection_id.clone(), message)
                .await
            {
                tracing::warn!("Ignoring message from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::Reaction {
            message_id,
            emoji,
            user,
        } => {
            if let Err(e) = state
                .react_to_message_usecase
                .execute(connection_id.clone(), MessageId::new(message_id), emoji, user)
                .await
            {
                tracing::warn!("Ignoring reaction from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::Read {
            message_id,
            username,
        } => {
            if let Err(e) = state
                .mark_read_usecase
                .execute(connection_id.clone(), MessageId::new(message_id), username)
                .await
            {
                tracing::warn!("Failed to route read receipt from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::Typing { is_typing } => {
            if let Err(e) = state
                .update_typing_usecase
                .execute(connection_id.clone(), is_typing)
                .await
            {
                tracing::warn!("Failed to route typing state from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::PrivateMessage { to, message } => {
            if let Err(e) = state
                .send_private_message_usecase
                .execute(connection_id.clone(), to, message)
                .await
            {
                tracing::warn!("Ignoring private message from '{}': {}", connection_id, e);
            }
        }
        ClientEvent::SendFile {
            file,
            file_type,
            file_name,
            is_private,
            to,
        } => {
            let payload = FilePayload {
                data: file,
                media_type: file_type,
                file_name,
            };
            if let Err(e) = state
                .send_file_usecase
                .execute(connection_id.clone(), payload, is_private, to)
                .await
            {
                tracing::warn!("Ignoring file from '{}': {}", connection_id, e);
            }
        }
    }
}
