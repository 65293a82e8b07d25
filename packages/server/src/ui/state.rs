//! Shared application state.

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::{
    domain::{ChatRepository, MessagePusher},
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, GetMessagesUseCase, GetSessionsUseCase,
        JoinChatUseCase, MarkReadUseCase, ReactToMessageUseCase, SendFileUseCase,
        SendMessageUseCase, SendPrivateMessageUseCase, UpdateTypingUseCase,
    },
};

/// Use cases shared by every handler
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    pub send_file_usecase: Arc<SendFileUseCase>,
    pub react_to_message_usecase: Arc<ReactToMessageUseCase>,
    pub mark_read_usecase: Arc<MarkReadUseCase>,
    pub update_typing_usecase: Arc<UpdateTypingUseCase>,
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    pub get_sessions_usecase: Arc<GetSessionsUseCase>,
}

impl AppState {
    /// Wire every use case to the same repository, pusher and clock.
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            join_chat_usecase: Arc::new(JoinChatUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            send_private_message_usecase: Arc::new(SendPrivateMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            send_file_usecase: Arc::new(SendFileUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            )),
            react_to_message_usecase: Arc::new(ReactToMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            mark_read_usecase: Arc::new(MarkReadUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            update_typing_usecase: Arc::new(UpdateTypingUseCase::new(
                repository.clone(),
                message_pusher,
            )),
            get_messages_usecase: Arc::new(GetMessagesUseCase::new(repository.clone())),
            get_sessions_usecase: Arc::new(GetSessionsUseCase::new(repository)),
        }
    }
}
