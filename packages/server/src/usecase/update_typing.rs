//! UseCase: 入力中状態の更新
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateTypingUseCase::execute() メソッド
//! - 入力中フラグの更新と、入力中 Identity 一覧のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：入力開始・終了
//! - エッジケース：参加前の typing（無視）

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, Identity, MessagePushError, MessagePusher,
};

use super::delivery::broadcast_to_all;

/// 入力中状態更新のユースケース
pub struct UpdateTypingUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateTypingUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 入力中フラグを更新
    ///
    /// 参加前の接続からの更新は無視し、`Ok(None)` を返します。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Result<Option<Vec<Identity>>, MessagePushError> {
        let Some(typing) = self
            .repository
            .set_typing(connection_id.clone(), is_typing)
            .await
        else {
            tracing::debug!("Typing update from '{}' before join ignored", connection_id);
            return Ok(None);
        };

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ChatEvent::TypingUsers(typing.clone()),
        )
        .await?;

        Ok(Some(typing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::MockMessagePusher, infrastructure::repository::InMemoryChatRepository};

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn identity(name: &str) -> Identity {
        Identity::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_typing_start_and_stop() {
        // テスト項目: 入力開始で一覧に載り、終了で外れる
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::default());
        repository.join(conn("c1"), identity("alice")).await;
        repository.join(conn("c2"), identity("bob")).await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_connected_clients().returning(Vec::new);
        pusher.expect_broadcast().times(3).returning(|_, _| Ok(()));
        let usecase = UpdateTypingUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        usecase.execute(conn("c1"), true).await.unwrap();
        let both = usecase.execute(conn("c2"), true).await.unwrap();
        let after_stop = usecase.execute(conn("c1"), false).await.unwrap();

        // then (期待する結果):
        assert_eq!(both, Some(vec![identity("alice"), identity("bob")]));
        assert_eq!(after_stop, Some(vec![identity("bob")]));
    }

    #[tokio::test]
    async fn test_typing_before_join_is_ignored() {
        // テスト項目: 参加前の typing は配信されない
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::default());
        let pusher = MockMessagePusher::new();
        let usecase = UpdateTypingUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(conn("c1"), true).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
    }
}
