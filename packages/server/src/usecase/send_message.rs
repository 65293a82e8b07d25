//! UseCase: 公開メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ履歴への追加と、送信者を含む全員へのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの送信者によるメッセージ送信
//! - 異常系：空メッセージ（状態は変更しない）
//! - エッジケース：参加前の送信（"Anonymous" として記録）、履歴容量の超過

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatEvent, ChatMessage, ChatRepository, ConnectionId, MessageBody, MessagePusher, MessageText,
    Timestamp,
};

use super::{delivery::broadcast_to_all, error::SendMessageError};

/// 公開メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Clock（送信時刻の取得）
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 履歴に追加されたメッセージ
    /// * `Err(SendMessageError)` - 入力が不正、または配信に失敗
    pub async fn execute(
        &self,
        sender_id: ConnectionId,
        text: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let text = MessageText::new(text)?;
        let created_at = Timestamp::new(self.clock.now_millis());

        let message = self
            .repository
            .post_public_message(sender_id, MessageBody::Text(text), created_at)
            .await?;
        tracing::debug!("Message {} from '{}' appended to log", message.id, message.sender);

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ChatEvent::NewMessage(message.clone()),
        )
        .await?;

        Ok(message)
    }
}
