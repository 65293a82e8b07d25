//! UseCase: 既読処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - MarkReadUseCase::execute() メソッド
//! - 既読者の登録と、全既読者リストのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：初めての既読で全員に既読者リストが届く
//! - エッジケース：同じ Identity の重複既読（配信しない）
//! - エッジケース：追い出し済み・存在しないメッセージへの既読（記録も配信もしない）

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, Identity, MessageId, MessagePushError, MessagePusher,
};

use super::delivery::broadcast_to_all;

/// 既読のユースケース
pub struct MarkReadUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl MarkReadUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 既読を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(readers))` - 既読者が増えた（全員に配信済み）
    /// * `Ok(None)` - 既に既読だった、またはメッセージが存在しない（配信なし）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        message_id: MessageId,
        username: Option<String>,
    ) -> Result<Option<Vec<Identity>>, MessagePushError> {
        let identity = match username.and_then(|name| Identity::new(name).ok()) {
            Some(identity) => identity,
            None => self.repository.resolve_identity(&connection_id).await,
        };

        let Some(readers) = self.repository.mark_read(message_id, identity).await else {
            return Ok(None);
        };

        broadcast_to_all(
            self.message_pusher.as_ref(),
            &ChatEvent::ReadReceipt {
                message_id,
                readers: readers.clone(),
            },
        )
        .await?;

        Ok(Some(readers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageBody, MessageText, MockMessagePusher, Timestamp},
        infrastructure::repository::InMemoryChatRepository,
    };

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn text(body: &str) -> MessageBody {
        MessageBody::Text(MessageText::new(body.to_string()).unwrap())
    }

    async fn post(repository: &InMemoryChatRepository, body: &str) -> MessageId {
        repository
            .post_public_message(conn("c1"), text(body), Timestamp::new(0))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_mark_read_broadcasts_full_reader_set_once() {
        // テスト項目: 既読者リスト全体が配信され、同じ Identity の再既読では配信されない
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::default());
        let message_id = post(&repository, "hello").await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_connected_clients().returning(|| vec![conn("c1")]);
        pusher
            .expect_broadcast()
            .times(2)
            .returning(|_, _| Ok(()));
        let usecase = MarkReadUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let first = usecase
            .execute(conn("c1"), message_id, Some("alice".to_string()))
            .await
            .unwrap();
        let second = usecase
            .execute(conn("c2"), message_id, Some("bob".to_string()))
            .await
            .unwrap();
        let repeated = usecase
            .execute(conn("c1"), message_id, Some("alice".to_string()))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(first.map(|r| r.len()), Some(1));
        let names: Vec<String> = second
            .unwrap()
            .into_iter()
            .map(Identity::into_string)
            .collect();
        assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(repeated, None);
    }

    #[tokio::test]
    async fn test_mark_read_private_message_falls_back_to_session_identity() {
        // テスト項目: username が無ければ接続の Identity（未参加なら "Anonymous"）でプライベートメッセージが既読になる
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::default());
        let private = repository
            .compose_private_message(conn("c1"), conn("c2"), text("psst"), Timestamp::new(0))
            .await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_connected_clients().returning(Vec::new);
        pusher.expect_broadcast().times(1).returning(|_, _| Ok(()));
        let usecase = MarkReadUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let readers = usecase
            .execute(conn("c2"), private.id, None)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(readers, Some(vec![Identity::anonymous()]));
    }

    #[tokio::test]
    async fn test_mark_read_on_missing_message_is_silent() {
        // テスト項目: 追い出し済み・存在しないメッセージへの既読は Ok(None) で配信されない
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::with_history_capacity(1));
        let evicted = post(&repository, "first").await;
        post(&repository, "second").await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_connected_clients().returning(|| vec![conn("c1")]);
        pusher.expect_broadcast().times(0);
        let usecase = MarkReadUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let for_evicted = usecase
            .execute(conn("c1"), evicted, Some("alice".to_string()))
            .await;
        let for_unknown = usecase
            .execute(conn("c1"), MessageId::new(999_999), Some("alice".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(for_evicted, Ok(None));
        assert_eq!(for_unknown, Ok(None));
    }
}
