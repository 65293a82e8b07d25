//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 つのイベントに対する状態変更を完結させます。
//! 実装はメソッド単位で排他制御し、イベント処理の原子性を保証してください。

use async_trait::async_trait;

use super::{
    ChatMessage, ConnectionId, Departure, Identity, MessageBody, MessageId, MessagePage,
    PageRequest, ReactionOutcome, ReactionSymbol, RepositoryError, Session, Timestamp,
};

/// Chat Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// 接続に Identity を登録し、更新後の参加者リストを返す
    async fn join(&self, connection_id: ConnectionId, identity: Identity) -> Vec<Session>;

    /// 接続を参加者リストと入力中リストから削除
    async fn leave(&self, connection_id: &ConnectionId) -> Departure;

    /// 参加者リストを参加順で取得
    async fn list_sessions(&self) -> Vec<Session>;

    /// 接続の Identity を解決（未参加なら "Anonymous"）
    async fn resolve_identity(&self, connection_id: &ConnectionId) -> Identity;

    /// 公開メッセージを作成してログに追加
    async fn post_public_message(
        &self,
        sender_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> Result<ChatMessage, RepositoryError>;

    /// プライベートメッセージを作成（ログには追加しない）
    async fn compose_private_message(
        &self,
        sender_id: ConnectionId,
        recipient_id: ConnectionId,
        body: MessageBody,
        created_at: Timestamp,
    ) -> ChatMessage;

    /// 履歴をページ単位で取得
    async fn page_messages(&self, request: PageRequest) -> MessagePage;

    /// リアクションを追加
    async fn add_reaction(
        &self,
        message_id: MessageId,
        symbol: ReactionSymbol,
        identity: Identity,
    ) -> ReactionOutcome;

    /// 既読を登録（変化があれば全既読者を返す）
    async fn mark_read(&self, message_id: MessageId, identity: Identity) -> Option<Vec<Identity>>;

    /// 入力中フラグを更新（未参加なら None）
    async fn set_typing(
        &self,
        connection_id: ConnectionId,
        is_typing: bool,
    ) -> Option<Vec<Identity>>;
}
