//! UseCase: ファイル送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendFileUseCase::execute() メソッド
//! - 公開ファイルは履歴に追加して全員へ、プライベートファイルは宛先と送信者だけへ
//!
//! ### どのような状況を想定しているか
//! - 正常系：公開ファイル、プライベートファイル
//! - エッジケース：is_private だが宛先なし（公開扱い）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatEvent, ChatMessage, ChatRepository, ConnectionId, FilePayload, MessageBody, MessagePusher,
    Timestamp,
};

use super::{
    delivery::{broadcast_to_all, deliver_private},
    error::SendMessageError,
};

/// ファイル送信のユースケース
pub struct SendFileUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendFileUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// ファイル送信を実行
    ///
    /// `is_private` かつ `to` が空でない場合のみプライベートとして扱います。
    /// ファイルの中身は解釈せずにそのまま中継します。
    pub async fn execute(
        &self,
        sender_id: ConnectionId,
        file: FilePayload,
        is_private: bool,
        to: Option<String>,
    ) -> Result<ChatMessage, SendMessageError> {
        let created_at = Timestamp::new(self.clock.now_millis());
        let recipient_id = match to.filter(|to| is_private && !to.trim().is_empty()) {
            Some(to) => Some(ConnectionId::new(to)?),
            None => None,
        };

        match recipient_id {
            Some(recipient_id) => {
                let message = self
                    .repository
                    .compose_private_message(
                        sender_id.clone(),
                        recipient_id.clone(),
                        MessageBody::File(file),
                        created_at,
                    )
                    .await;
                tracing::debug!(
                    "Private file {} from '{}' to '{}'",
                    message.id,
                    sender_id,
                    recipient_id
                );

                deliver_private(
                    self.message_pusher.as_ref(),
                    &sender_id,
                    &recipient_id,
                    &ChatEvent::FileMessage(message.clone()),
                )
                .await?;
                Ok(message)
            }
            None => {
                let message = self
                    .repository
                    .post_public_message(sender_id, MessageBody::File(file), created_at)
                    .await?;
                tracing::debug!("File {} from '{}' appended to log", message.id, message.sender);

                broadcast_to_all(
                    self.message_pusher.as_ref(),
                    &ChatEvent::FileMessage(message.clone()),
                )
                .await?;
                Ok(message)
            }
        }
    }
}
