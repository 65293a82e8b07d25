//! 配信ヘルパー
//!
//! 「全員へ」と「送信者 + 宛先へ」の 2 種類の配信先をまとめます。

use crate::domain::{ChatEvent, ConnectionId, MessagePushError, MessagePusher};

/// 接続中の全てのクライアント（送信者を含む）にイベントを配信
pub(crate) async fn broadcast_to_all(
    message_pusher: &dyn MessagePusher,
    event: &ChatEvent,
) -> Result<(), MessagePushError> {
    let targets = message_pusher.connected_clients().await;
    tracing::debug!("Broadcasting {} to {} connection(s)", kind(event), targets.len());
    message_pusher.broadcast(targets, event).await
}

/// 宛先と送信者にだけイベントを配信
///
/// 宛先が既に切断されている場合は配信をスキップし、送信者へのエコーは続行します。
/// 宛先と送信者が同じ接続なら 1 回だけ配信します。
pub(crate) async fn deliver_private(
    message_pusher: &dyn MessagePusher,
    sender_id: &ConnectionId,
    recipient_id: &ConnectionId,
    event: &ChatEvent,
) -> Result<(), MessagePushError> {
    push_tolerating_absence(message_pusher, recipient_id, event).await?;
    if sender_id != recipient_id {
        push_tolerating_absence(message_pusher, sender_id, event).await?;
    }
    Ok(())
}

async fn push_tolerating_absence(
    message_pusher: &dyn MessagePusher,
    target: &ConnectionId,
    event: &ChatEvent,
) -> Result<(), MessagePushError> {
    match message_pusher.push_to(target, event).await {
        Ok(()) => Ok(()),
        Err(MessagePushError::ClientNotFound(id)) => {
            tracing::warn!("Connection '{}' is no longer reachable, skipping delivery", id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn kind(event: &ChatEvent) -> &'static str {
    match event {
        ChatEvent::Connected { .. } => "connected",
        ChatEvent::PresenceList(_) => "user_list",
        ChatEvent::Joined(_) => "user_joined",
        ChatEvent::Left(_) => "user_left",
        ChatEvent::NewMessage(_) => "receive_message",
        ChatEvent::PrivateMessage(_) => "private_message",
        ChatEvent::FileMessage(_) => "file_message",
        ChatEvent::Reaction { .. } => "reaction",
        ChatEvent::ReadReceipt { .. } => "read_receipt",
        ChatEvent::TypingUsers(_) => "typing_users",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Identity, MockMessagePusher};
    use mockall::predicate::eq;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn event() -> ChatEvent {
        ChatEvent::TypingUsers(vec![Identity::new("alice".to_string()).unwrap()])
    }

    #[tokio::test]
    async fn test_broadcast_to_all_targets_every_connection() {
        // テスト項目: 接続中の全てのクライアントが配信対象になる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_connected_clients()
            .times(1)
            .returning(|| vec![conn("c1"), conn("c2")]);
        pusher
            .expect_broadcast()
            .withf(|targets, _| targets == &vec![conn("c1"), conn("c2")])
            .times(1)
            .returning(|_, _| Ok(()));

        // when (操作):
        let result = broadcast_to_all(&pusher, &event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_deliver_private_skips_unreachable_recipient() {
        // テスト項目: 宛先が不在でも送信者へのエコーは届く
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .with(eq(conn("gone")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Err(MessagePushError::ClientNotFound("gone".to_string())));
        pusher
            .expect_push_to()
            .with(eq(conn("alice")), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        // when (操作):
        let result = deliver_private(&pusher, &conn("alice"), &conn("gone"), &event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_deliver_private_to_self_once() {
        // テスト項目: 自分宛てのプライベートメッセージは 1 回だけ配信される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().times(1).returning(|_, _| Ok(()));

        // when (操作):
        let result = deliver_private(&pusher, &conn("alice"), &conn("alice"), &event()).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_deliver_private_propagates_push_failure() {
        // テスト項目: 不在以外の送信失敗はエラーとして返る
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .times(1)
            .returning(|_, _| Err(MessagePushError::PushFailed("closed".to_string())));

        // when (操作):
        let result = deliver_private(&pusher, &conn("alice"), &conn("bob"), &event()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::PushFailed("closed".to_string()))
        );
    }
}
