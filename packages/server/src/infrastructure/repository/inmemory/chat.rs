//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! ChatRoom 集約を 1 つの Mutex で保護し、各メソッドがロックを 1 回だけ取得することで
//! イベント単位の原子性を保証します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ChatRepository, ChatRoom, ConnectionId, Departure, Identity, MessageBody,
    MessageId, MessagePage, PageRequest, ReactionOutcome, ReactionSymbol, RepositoryError,
    Session, Timestamp,
};

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    room: Arc<Mutex<ChatRoom>>,
}

impl Default for InMemoryChatRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ChatRoom::default())))
    }
}

impl InMemoryChatRepository {
    /// 新しい InMemoryChatRepository を作成
    pub fn new(room: Arc<Mutex<ChatRoom>>) -> Self {
        Self { room }
    }

    /// 指定した履歴容量の ChatRoom を持つ Repository を作成
    pub fn with_history_capacity(history_capacity: usize) -> Self {
        Self::new(Arc::new(Mutex::new(ChatRoom::new(history_capacity))))
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn join(&self, connection_id: ConnectionId, identity: Identity) -> Vec<Session> {
        let mut room = self.room.lock().await;
        room.join(connection_id, identity)
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Departure {
        let mut room = self.room.lock().await;
        room.leave(connection_id)
    }

    async fn list_sessions(&self) -> Vec<Session> {
        let room = self.room.lock().await;
        room.sessions()
    }

    async fn resolve_identity(&self, connection_id: &ConnectionId) -> Identity {
        let room = self.room.lock().await;
        room.resolve(connection_id)
    }

    async fn post_public_message(
        &self,
        sender_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut room = self.room.lock().await;
        room.post_public(sender_id, body, created_at)
    }

    async fn compose_private_message(
        &self,
        sender_id: ConnectionId,
        recipient_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> ChatMessage {
        let mut room = self.room.lock().await;
        room.compose_private(sender_id, recipient_id, body, created_at)
    }

    async fn page_messages(&self, request: PageRequest) -> MessagePage {
        let room = self.room.lock().await;
        room.page(request)
    }

    async fn add_reaction(
        &self,
        message_id: MessageId,
        symbol: ReactionSymbol,
        identity: Identity,
    ) -> ReactionOutcome {
        let mut room = self.room.lock().await;
        room.react(message_id, symbol, identity)
    }

    async fn mark_read(&self, message_id: MessageId, identity: Identity) -> Option<Vec<Identity>> {
        let mut room = self.room.lock().await;
        room.mark_read(message_id, identity)
    }

    async fn set_typing(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Option<Vec<Identity>> {
        let mut room = self.room.lock().await;
        room.set_typing(connection_id, is_typing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageText;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryChatRepository が ChatRoom の操作を正しく委譲すること
    // - 並行アクセス時もメッセージ ID とログの整合性が保たれること
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるデータアクセス層の中核
    // - 複数接続から同時にイベントが届いても状態が壊れないことを保証する
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn text(body: &str) -> MessageBody {
        MessageBody::Text(MessageText::new(body.to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_join_and_leave() {
        // テスト項目: 参加と退出が参加者リストに反映される
        // given (前提条件):
        let repo = InMemoryChatRepository::with_history_capacity(100);
        let alice = Identity::new("alice".to_string()).unwrap();

        // when (操作):
        let after_join = repo.join(conn("c1"), alice.clone()).await;
        let departure = repo.leave(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(after_join.len(), 1);
        assert_eq!(departure.departed.map(|s| s.identity), Some(alice));
        assert!(repo.list_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_posts_keep_log_consistent() {
        // テスト項目: 並行して投稿しても ID は重複せず、ログは容量内に収まる
        // given (前提条件):
        let repo = Arc::new(InMemoryChatRepository::with_history_capacity(100));

        // when (操作):
        let mut handles = Vec::new();
        for task in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                for n in 0..25 {
                    repo.post_public_message(
                        conn(&format!("c{}", task)),
                        text(&format!("{}-{}", task, n)),
                        Timestamp::new(0),
                    )
                    .await
                    .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        let page = repo.page_messages(PageRequest::new(0, 200)).await;
        assert_eq!(page.total, 100);
        let mut ids: Vec<u64> = page.messages.iter().map(|m| m.id.value()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
        assert_eq!(ids.last().copied(), Some(200));
    }
}
