//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 新しい接続の登録と、接続直後に送る初期イベント
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続 ID の通知と参加者リストのスナップショット送信
//! - エッジケース：既に参加者がいる状態での接続

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, MessagePushError, MessagePusher, PusherChannel,
};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ChatRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント接続を実行
    ///
    /// 送信チャンネルを登録し、新しい接続にだけ `connected` と現在の参加者リストを送ります。
    /// 接続しただけではセッションは作られません（`user_join` で作成）。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<(), MessagePushError> {
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        self.message_pusher
            .push_to(
                &connection_id,
                &ChatEvent::Connected {
                    connection_id: connection_id.clone(),
                },
            )
            .await?;

        let sessions = self.repository.list_sessions().await;
        self.message_pusher
            .push_to(&connection_id, &ChatEvent::PresenceList(sessions))
            .await
    }
}
