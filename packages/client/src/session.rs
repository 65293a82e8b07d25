//! WebSocket client session management.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    attachment::load_attachment,
    command::Command,
    config::ClientConfig,
    error::ClientError,
    formatter::MessageFormatter,
    history::HistoryClient,
    input::InputEvent,
    reconciler::{ClientState, StateChange},
    typing::TypingDebouncer,
    ui::print_with_prompt,
};

const TYPING_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Whether the input loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run one WebSocket client session.
///
/// Returns `Ok(())` when the user quits and `ConnectionError` when the
/// connection is lost.
pub async fn run_client_session(
    config: &ClientConfig,
    input_rx: &mut mpsc::UnboundedReceiver<InputEvent>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /help lists commands.\n",
        config.username
    );

    let (mut write, mut read) = ws_stream.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientEvent>();

    // Spawn a task to forward outgoing events to the socket
    let mut write_task = tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                return true;
            }
        }
        false
    });

    let state = Arc::new(Mutex::new(ClientState::new(config.username.clone())));

    // Spawn a task to reconcile incoming events
    let state_for_read = state.clone();
    let out_tx_for_read = out_tx.clone();
    let username_for_read = config.username.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Ignoring unrecognized frame: {}", e);
                            continue;
                        }
                    };

                    let mut state = state_for_read.lock().await;
                    let change = state.apply(event);
                    if let Some(output) = render_change(&state, &change) {
                        print_with_prompt(&output, &username_for_read);
                    }
                    for request in state.drain_read_requests() {
                        out_tx_for_read.send(request).ok();
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                _ => {}
            }
        }
        true
    });

    let mut session = Session {
        config,
        state,
        out_tx,
        history: HistoryClient::new(config.api_url.clone()),
        debouncer: TypingDebouncer::default(),
    };

    session.send(ClientEvent::UserJoin {
        username: config.username.clone(),
    });
    if let Err(e) = session.load_older().await {
        tracing::warn!("{}", e);
    }

    let mut ticker = tokio::time::interval(TYPING_POLL_INTERVAL);

    let lost = loop {
        tokio::select! {
            read_result = &mut read_task => {
                write_task.abort();
                break read_result.unwrap_or(true);
            }
            write_result = &mut write_task => {
                read_task.abort();
                break write_result.unwrap_or(true);
            }
            input = input_rx.recv() => {
                let flow = match input {
                    None | Some(InputEvent::Quit) => Flow::Quit,
                    Some(InputEvent::Edit) => {
                        session.on_edit();
                        Flow::Continue
                    }
                    Some(InputEvent::Line(line)) => session.on_line(&line).await,
                };
                if flow == Flow::Quit {
                    read_task.abort();
                    write_task.abort();
                    break false;
                }
            }
            _ = ticker.tick() => {
                if let Some(is_typing) = session.debouncer.poll(Instant::now()) {
                    session.send(ClientEvent::Typing { is_typing });
                }
            }
        }
    };

    if lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }
    Ok(())
}

/// Text to print for an applied change, if any.
///
/// Messages outside the active view only produce a notice when someone else
/// sent them.
pub fn render_change(state: &ClientState, change: &StateChange) -> Option<String> {
    match change {
        StateChange::Connected | StateChange::Unchanged => None,
        StateChange::Users => Some(MessageFormatter::format_user_list(
            state.users(),
            state.connection_id(),
        )),
        StateChange::Joined(user) => Some(MessageFormatter::format_joined(user)),
        StateChange::Left(user) => Some(MessageFormatter::format_left(user)),
        StateChange::Message { message, visible } => {
            if *visible {
                Some(MessageFormatter::format_message(
                    message,
                    state.readers(message.id),
                ))
            } else if state.is_from_others(message) {
                Some(MessageFormatter::format_notice(message))
            } else {
                None
            }
        }
        StateChange::Reaction {
            message_id,
            emoji,
            user,
        } => Some(MessageFormatter::format_reaction(*message_id, emoji, user)),
        StateChange::ReadReceipt { message_id } => {
            let own = state
                .messages()
                .iter()
                .any(|m| m.id == *message_id && !state.is_from_others(m));
            let readers = state.readers(*message_id);
            (own && !readers.is_empty())
                .then(|| MessageFormatter::format_read_receipt(*message_id, readers))
        }
        StateChange::Typing => MessageFormatter::format_typing(state.visible_typing()),
    }
}

struct Session<'a> {
    config: &'a ClientConfig,
    state: Arc<Mutex<ClientState>>,
    out_tx: mpsc::UnboundedSender<ClientEvent>,
    history: HistoryClient,
    debouncer: TypingDebouncer,
}

impl Session<'_> {
    fn send(&self, event: ClientEvent) {
        if self.out_tx.send(event).is_err() {
            tracing::warn!("Writer closed; event dropped");
        }
    }

    fn print(&self, output: &str) {
        print_with_prompt(output, &self.config.username);
    }

    fn on_edit(&mut self) {
        if let Some(is_typing) = self.debouncer.on_edit(Instant::now()) {
            self.send(ClientEvent::Typing { is_typing });
        }
    }

    fn stop_typing(&mut self) {
        if let Some(is_typing) = self.debouncer.on_send() {
            self.send(ClientEvent::Typing { is_typing });
        }
    }

    async fn on_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(command) => match self.handle_command(command).await {
                Ok(flow) => flow,
                Err(e) => {
                    self.print(&format!("\n{}\n", e));
                    Flow::Continue
                }
            },
            Err(e) => {
                self.print(&format!("\n{}\n", e));
                Flow::Continue
            }
        }
    }

    async fn handle_command(&mut self, command: Command) -> Result<Flow, ClientError> {
        match command {
            Command::Say(text) => {
                self.stop_typing();
                self.say(text).await;
            }
            Command::Private { username, message } => {
                let peer = {
                    let mut state = self.state.lock().await;
                    let peer = state.find_user(&username).cloned().ok_or_else(|| {
                        ClientError::InvalidCommand(format!("'{}' is not online", username))
                    })?;
                    state.select_private_peer(Some(peer.clone()));
                    peer
                };
                self.print(&MessageFormatter::format_view_switched(Some(&peer)));
                self.redraw().await;
                if let Some(text) = message {
                    self.stop_typing();
                    self.say(text).await;
                }
            }
            Command::Public => {
                self.state.lock().await.select_private_peer(None);
                self.print(&MessageFormatter::format_view_switched(None));
                self.redraw().await;
            }
            Command::React { message_id, emoji } => {
                self.send(ClientEvent::Reaction {
                    message_id,
                    emoji,
                    user: Some(self.config.username.clone()),
                });
            }
            Command::File { path } => {
                let attachment = load_attachment(&path).await?;
                let peer = self.state.lock().await.private_peer().cloned();
                self.send(ClientEvent::SendFile {
                    file: attachment.data_url,
                    file_type: attachment.media_type,
                    file_name: attachment.file_name,
                    is_private: peer.is_some(),
                    to: peer.map(|peer| peer.id),
                });
            }
            Command::LoadOlder => self.load_older().await?,
            Command::Search(term) => {
                self.state.lock().await.set_search(term);
                self.redraw().await;
            }
            Command::Users => {
                let state = self.state.lock().await;
                self.print(&MessageFormatter::format_user_list(
                    state.users(),
                    state.connection_id(),
                ));
            }
            Command::Help => self.print(&MessageFormatter::format_help()),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Send text to the active view: the open private thread, or the public feed.
    async fn say(&self, text: String) {
        let peer = self.state.lock().await.private_peer().cloned();
        let event = match peer {
            Some(peer) => ClientEvent::PrivateMessage {
                to: peer.id,
                message: text,
            },
            None => ClientEvent::SendMessage { message: text },
        };
        self.send(event);
    }

    /// Fetch the next older page of history, if any remains.
    async fn load_older(&self) -> Result<(), ClientError> {
        let Some((offset, limit)) = self
            .state
            .lock()
            .await
            .next_page_request(self.config.page_size)
        else {
            self.print(&MessageFormatter::format_history_loaded(0, false));
            return Ok(());
        };

        let page = self.history.fetch_page(offset, limit).await?;

        let mut state = self.state.lock().await;
        let added = state.apply_history_page(page);
        let output = MessageFormatter::format_history_loaded(added, state.has_more());
        for request in state.drain_read_requests() {
            self.send(request);
        }
        drop(state);

        self.print(&output);
        self.redraw().await;
        Ok(())
    }

    /// Reprint the active view.
    async fn redraw(&self) {
        let mut state = self.state.lock().await;
        let output: String = state
            .active_view()
            .into_iter()
            .map(|message| MessageFormatter::format_message(message, state.readers(message.id)))
            .collect();
        for request in state.drain_read_requests() {
            self.send(request);
        }
        drop(state);

        if !output.is_empty() {
            self.print(&output);
        }
    }
}
