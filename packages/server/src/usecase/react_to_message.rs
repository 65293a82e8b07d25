//! UseCase: リアクション処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReactToMessageUseCase::execute() メソッド
//! - リアクションの追加と、変化があった場合だけのブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴にあるメッセージへのリアクション
//! - エッジケース：同じリアクションの重複（配信しない）、存在しないメッセージ（無視）

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ChatRepository, ConnectionId, Identity, MessageId, MessagePusher, ReactionOutcome,
    ReactionSymbol,
};

use super::{delivery::broadcast_to_all, error::SendMessageError};

/// リアクションのユースケース
pub struct ReactToMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReactToMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// リアクションを実行
    ///
    /// `user` が指定されていればその Identity、なければ接続の Identity でリアクションします。
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        message_id: MessageId,
        emoji: String,
        user: Option<String>,
    ) -> Result<ReactionOutcome, SendMessageError> {
        let symbol = ReactionSymbol::new(emoji)?;
        let identity = match user.and_then(|name| Identity::new(name).ok()) {
            Some(identity) => identity,
            None => self.repository.resolve_identity(&connection_id).await,
        };

        let outcome = self
            .repository
            .add_reaction(message_id, symbol.clone(), identity.clone())
            .await;

        match outcome {
            ReactionOutcome::Added => {
                broadcast_to_all(
                    self.message_pusher.as_ref(),
                    &ChatEvent::Reaction {
                        message_id,
                        symbol,
                        identity,
                    },
                )
                .await?;
            }
            ReactionOutcome::AlreadyPresent => {
                tracing::debug!("'{}' already reacted to message {}", identity, message_id);
            }
            ReactionOutcome::MessageNotFound => {
                tracing::debug!("Reaction to unknown message {} dropped", message_id);
            }
        }

        Ok(outcome)
    }
}
