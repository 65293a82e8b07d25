//! UseCase 層のエラー定義
//!
//! いずれも WebSocket ハンドラでログ出力されるだけで、クライアントには返しません。

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, ValueObjectError};

/// 参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// メッセージ系イベント（テキスト、プライベート、ファイル、リアクション）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
