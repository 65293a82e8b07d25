//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 参加者リスト・入力中リストからの削除と、残りの全員への通知
//!
//! ### なぜこのテストが必要か
//! - typing(false) を送らずに切断したクライアントが入力中のまま残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みクライアントの切断（user_left → user_list → typing_users）
//! - エッジケース：参加前に切断したクライアント（user_left なし）

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, Departure, MessagePushError, MessagePusher,
};

use super::delivery::broadcast_to_all;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント切断を実行
    ///
    /// 送信チャンネルを先に登録解除するため、切断したクライアント自身には通知されません。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Departure, MessagePushError> {
        self.message_pusher.unregister_client(&connection_id).await;

        let departure = self.repository.leave(&connection_id).await;
        let pusher = self.message_pusher.as_ref();

        if let Some(session) = &departure.departed {
            tracing::info!("'{}' ({}) left", session.identity, connection_id);
            broadcast_to_all(pusher, &ChatEvent::Left(session.clone())).await?;
        }
        broadcast_to_all(pusher, &ChatEvent::PresenceList(departure.sessions.clone())).await?;
        broadcast_to_all(pusher, &ChatEvent::TypingUsers(departure.typing.clone())).await?;

        Ok(departure)
    }
}
