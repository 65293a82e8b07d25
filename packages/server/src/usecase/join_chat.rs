//! UseCase: チャット参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - Identity の登録と、参加者リスト・参加通知のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加後に user_list → user_joined の順で全員に届く
//! - 異常系：空の Identity での参加（無視される）
//! - エッジケース：同じ接続での再参加（上書き）

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, Identity, MessagePusher, Session,
};

use super::{delivery::broadcast_to_all, error::JoinError};

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// チャット参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Session>)` - 更新後の参加者リスト（参加順）
    /// * `Err(JoinError::EmptyIdentity)` - Identity が空（状態は変更しない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: String,
    ) -> Result<Vec<Session>, JoinError> {
        let identity = Identity::new(username).map_err(|_| JoinError::EmptyIdentity)?;

        let sessions = self
            .repository
            .join(connection_id.clone(), identity.clone())
            .await;
        tracing::info!("'{}' joined as '{}'", connection_id, identity);

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ChatEvent::PresenceList(sessions.clone()),
        )
        .await?;
        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ChatEvent::Joined(Session::new(connection_id, identity)),
        )
        .await?;

        Ok(sessions)
    }
}
