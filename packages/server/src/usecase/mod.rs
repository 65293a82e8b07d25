//! UseCase layer: one use case per inbound event, plus the two query surfaces.

mod delivery;
pub mod error;

pub mod connect_client;
pub mod disconnect_client;
pub mod get_messages;
pub mod get_sessions;
pub mod join_chat;
pub mod mark_read;
pub mod react_to_message;
pub mod send_file;
pub mod send_message;
pub mod send_private_message;
pub mod update_typing;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{JoinError, SendMessageError};
pub use get_messages::GetMessagesUseCase;
pub use get_sessions::GetSessionsUseCase;
pub use join_chat::JoinChatUseCase;
pub use mark_read::MarkReadUseCase;
pub use react_to_message::ReactToMessageUseCase;
pub use send_file::SendFileUseCase;
pub use send_message::SendMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
pub use update_typing::UpdateTypingUseCase;
