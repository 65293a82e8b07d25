//! UseCase: プライベートメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendPrivateMessageUseCase::execute() メソッド
//! - 宛先と送信者だけへの配信、履歴に残らないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの 2 人の間のプライベートメッセージ
//! - エッジケース：宛先が既に切断済み（送信者へのエコーのみ）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatEvent, ChatMessage, ChatRepository, ConnectionId, MessageBody, MessagePusher, MessageText,
    Timestamp,
};

use super::{delivery::deliver_private, error::SendMessageError};

/// プライベートメッセージ送信のユースケース
pub struct SendPrivateMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
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

    /// プライベートメッセージ送信を実行
    ///
    /// `to` は宛先の接続 ID。メッセージは履歴に追加しません。
    pub async fn execute(
        &self,
        sender_id: ConnectionId,
        to: String,
        text: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let recipient_id = ConnectionId::new(to)?;
        let text = MessageText::new(text)?;
        let created_at = Timestamp::new(self.clock.now_millis());

        let message = self
            .repository
            .compose_private_message(
                sender_id.clone(),
                recipient_id.clone(),
                MessageBody::Text(text),
                created_at,
            )
            .await;
        tracing::debug!(
            "Private message {} from '{}' to '{}'",
            message.id,
            sender_id,
            recipient_id
        );

        deliver_private(
            self.message_pusher.as_ref(),
            &sender_id,
            &recipient_id,
            &ChatEvent::PrivateMessage(message.clone()),
        )
        .await?;

        Ok(message)
    }
}
