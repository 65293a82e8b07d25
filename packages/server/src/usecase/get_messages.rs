//! UseCase: 履歴のページ取得

use std::sync::Arc;

use crate::domain::{ChatRepository, MessagePage, PageRequest};

/// 履歴ページ取得のユースケース
pub struct GetMessagesUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetMessagesUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 最新から `offset` 件さかのぼった位置から `limit` 件を古い順に返す
    pub async fn execute(&self, request: PageRequest) -> MessagePage {
        self.repository.page_messages(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MessageBody, MessageText, Timestamp},
        infrastructure::repository::InMemoryChatRepository,
    };

    #[tokio::test]
    async fn test_get_messages_pages_backward_from_newest() {
        // テスト項目: 25 件のうち 1 ページ目は 6〜25 件目、2 ページ目は 1〜5 件目
        // given (前提条件):
        let repository = Arc::new(InMemoryChatRepository::default());
        let sender = ConnectionId::new("c1".to_string()).unwrap();
        for i in 1..=25 {
            repository
                .post_public_message(
                    sender.clone(),
                    MessageBody::Text(MessageText::new(format!("m{}", i)).unwrap()),
                    Timestamp::new(i),
                )
                .await
                .unwrap();
        }
        let usecase = GetMessagesUseCase::new(repository);

        // when (操作):
        let newest = usecase.execute(PageRequest::new(0, 20)).await;
        let older = usecase.execute(PageRequest::new(20, 20)).await;

        // then (期待する結果):
        let ids = |page: &MessagePage| -> Vec<u64> {
            page.messages.iter().map(|m| m.id.value()).collect()
        };
        assert_eq!(ids(&newest), (6..=25).collect::<Vec<u64>>());
        assert_eq!(ids(&older), (1..=5).collect::<Vec<u64>>());
        assert_eq!(newest.total, 25);
    }
}
