//! UseCase: 参加者リスト取得

use std::sync::Arc;

use crate::domain::{ChatRepository, Session};

/// 参加者リスト取得のユースケース
pub struct GetSessionsUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl GetSessionsUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// 参加順の参加者リストを返す
    pub async fn execute(&self) -> Vec<Session> {
        self.repository.list_sessions().await
    }
}
