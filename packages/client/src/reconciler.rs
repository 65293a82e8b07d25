//! Client-side state reconciliation.
//!
//! Merges live server events and history pages into one message sequence and
//! derives the public feed and private-thread views from it. Pagination
//! counters move only on history pages, never on live events.

use std::collections::{HashMap, HashSet};

use hiroba_server::infrastructure::dto::{
    http::MessagesPageDto,
    websocket::{ClientEvent, MessageDto, ServerEvent, UserDto},
};

/// What an applied server event changed, for the UI to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Connected,
    Users,
    Joined(UserDto),
    Left(UserDto),
    /// A message was merged; `visible` tells whether it belongs to the active view
    Message { message: MessageDto, visible: bool },
    Reaction { message_id: u64, emoji: String, user: String },
    ReadReceipt { message_id: u64 },
    Typing,
    /// Already merged (e.g. received both live and via history)
    Unchanged,
}

/// The reconciled view model of one client.
#[derive(Debug, Clone)]
pub struct ClientState {
    local_identity: String,
    connection_id: Option<String>,
    messages: Vec<MessageDto>,
    offset: usize,
    total: usize,
    has_more: bool,
    read_receipts: HashMap<u64, Vec<String>>,
    requested_reads: HashSet<u64>,
    users: Vec<UserDto>,
    typing: Vec<String>,
    private_peer: Option<UserDto>,
    search: String,
}

impl ClientState {
    pub fn new(local_identity: impl Into<String>) -> Self {
        Self {
            local_identity: local_identity.into(),
            connection_id: None,
            messages: Vec::new(),
            offset: 0,
            total: 0,
            has_more: true,
            read_receipts: HashMap::new(),
            requested_reads: HashSet::new(),
            users: Vec::new(),
            typing: Vec::new(),
            private_peer: None,
            search: String::new(),
        }
    }

    pub fn local_identity(&self) -> &str {
        &self.local_identity
    }

    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }

    pub fn users(&self) -> &[UserDto] {
        &self.users
    }

    pub fn private_peer(&self) -> Option<&UserDto> {
        self.private_peer.as_ref()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn readers(&self, message_id: u64) -> &[String] {
        self.read_receipts
            .get(&message_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Merge one server event.
    pub fn apply(&mut self, event: ServerEvent) -> StateChange {
        match event {
            ServerEvent::Connected { connection_id } => {
                self.connection_id = Some(connection_id);
                StateChange::Connected
            }
            ServerEvent::UserList { users } => {
                self.users = users;
                StateChange::Users
            }
            ServerEvent::UserJoined(user) => StateChange::Joined(user),
            ServerEvent::UserLeft(user) => StateChange::Left(user),
            ServerEvent::ReceiveMessage(message) | ServerEvent::FileMessage(message) => {
                self.merge_live(message)
            }
            ServerEvent::PrivateMessage(mut message) => {
                message.is_private = true;
                self.merge_live(message)
            }
            ServerEvent::Reaction {
                message_id,
                emoji,
                user,
            } => {
                if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
                    let reactors = message.reactions.entry(emoji.clone()).or_default();
                    if !reactors.contains(&user) {
                        reactors.push(user.clone());
                    }
                }
                StateChange::Reaction {
                    message_id,
                    emoji,
                    user,
                }
            }
            ServerEvent::ReadReceipt {
                message_id,
                readers,
            } => {
                self.read_receipts.insert(message_id, readers);
                StateChange::ReadReceipt { message_id }
            }
            ServerEvent::TypingUsers { users } => {
                self.typing = users
                    .into_iter()
                    .filter(|name| name != &self.local_identity)
                    .collect();
                StateChange::Typing
            }
        }
    }

    fn merge_live(&mut self, message: MessageDto) -> StateChange {
        if self.messages.iter().any(|m| m.id == message.id) {
            return StateChange::Unchanged;
        }
        let visible = self.is_in_active_view(&message);
        self.messages.push(message.clone());
        StateChange::Message { message, visible }
    }

    /// Prepend an older page of history and advance the pagination counters.
    ///
    /// Returns how many messages were new to this client.
    pub fn apply_history_page(&mut self, page: MessagesPageDto) -> usize {
        let received = page.messages.len();
        let known: HashSet<u64> = self.messages.iter().map(|m| m.id).collect();
        let older: Vec<MessageDto> = page
            .messages
            .into_iter()
            .filter(|m| !known.contains(&m.id))
            .collect();
        let added = older.len();

        self.messages.splice(0..0, older);
        self.offset += received;
        self.total = page.total;
        // An empty page cannot advance the offset, so paging stops there
        self.has_more = received > 0 && self.total > self.offset;
        added
    }

    /// The `(offset, limit)` of the next older page, if any remains.
    pub fn next_page_request(&self, page_size: usize) -> Option<(usize, usize)> {
        self.has_more.then_some((self.offset, page_size))
    }

    /// Select a private conversation, or `None` for the public feed.
    pub fn select_private_peer(&mut self, peer: Option<UserDto>) {
        self.private_peer = peer;
    }

    pub fn find_user(&self, username: &str) -> Option<&UserDto> {
        self.users.iter().find(|user| user.username == username)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Every merged message, oldest first.
    pub fn messages(&self) -> &[MessageDto] {
        &self.messages
    }

    /// Public messages matching the search filter.
    pub fn public_view(&self) -> Vec<&MessageDto> {
        self.messages
            .iter()
            .filter(|m| !m.is_private)
            .filter(|m| self.matches_search(m))
            .collect()
    }

    /// Private messages exchanged with `peer`, matching the search filter.
    pub fn private_thread_view(&self, peer: &UserDto) -> Vec<&MessageDto> {
        self.messages
            .iter()
            .filter(|m| self.is_in_thread(m, peer))
            .filter(|m| self.matches_search(m))
            .collect()
    }

    /// The view selected by the private peer, with the search filter applied.
    pub fn active_view(&self) -> Vec<&MessageDto> {
        match &self.private_peer {
            Some(peer) => self.private_thread_view(peer),
            None => self.public_view(),
        }
    }

    /// Identities typing right now, excluding this client.
    ///
    /// Hidden while a private thread is open.
    pub fn visible_typing(&self) -> &[String] {
        if self.private_peer.is_some() {
            &[]
        } else {
            &self.typing
        }
    }

    /// `read` events for messages in the active view not yet read by this identity.
    ///
    /// Each message is requested at most once, so repeated reconciliation does not
    /// flood the server.
    pub fn drain_read_requests(&mut self) -> Vec<ClientEvent> {
        let pending: Vec<u64> = self
            .messages
            .iter()
            .filter(|m| self.is_in_active_view(m))
            .map(|m| m.id)
            .filter(|id| !self.requested_reads.contains(id))
            .filter(|id| !self.readers(*id).contains(&self.local_identity))
            .collect();

        pending
            .into_iter()
            .map(|message_id| {
                self.requested_reads.insert(message_id);
                ClientEvent::Read {
                    message_id,
                    username: Some(self.local_identity.clone()),
                }
            })
            .collect()
    }

    /// Whether the message was sent by someone other than this client.
    pub fn is_from_others(&self, message: &MessageDto) -> bool {
        message.sender != self.local_identity
    }

    fn is_in_active_view(&self, message: &MessageDto) -> bool {
        match &self.private_peer {
            Some(peer) => self.is_in_thread(message, peer),
            None => !message.is_private,
        }
    }

    /// Thread membership keys on identity plus the connection id at send time,
    /// so messages from before a reconnect no longer match.
    fn is_in_thread(&self, message: &MessageDto, peer: &UserDto) -> bool {
        if !message.is_private {
            return false;
        }
        let receiver = message.receiver.as_deref();
        let sent_by_me = message.sender == self.local_identity
            && Some(message.sender_id.as_str()) == self.connection_id.as_deref()
            && receiver == Some(peer.username.as_str());
        let sent_by_peer = message.sender == peer.username
            && message.sender_id == peer.id
            && receiver == Some(self.local_identity.as_str());
        sent_by_me || sent_by_peer
    }

    fn matches_search(&self, message: &MessageDto) -> bool {
        let term = self.search.trim();
        if term.is_empty() {
            return true;
        }
        let text = format!(
            "{} {}",
            message.message.as_deref().unwrap_or_default(),
            message.file_name.as_deref().unwrap_or_default()
        );
        text.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiroba_server::infrastructure::dto::websocket::MessageKindDto;
    use std::collections::BTreeMap;

    fn public(id: u64, sender: &str, sender_id: &str, text: &str) -> MessageDto {
        MessageDto {
            id,
            kind: MessageKindDto::Text,
            sender: sender.to_string(),
            sender_id: sender_id.to_string(),
            receiver: None,
            receiver_id: None,
            message: Some(text.to_string()),
            file: None,
            file_type: None,
            file_name: None,
            is_private: false,
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            timestamp_millis: 1_704_067_200_000,
            reactions: BTreeMap::new(),
        }
    }

    fn private(id: u64, sender: (&str, &str), receiver: (&str, &str), text: &str) -> MessageDto {
        MessageDto {
            kind: MessageKindDto::PrivateText,
            receiver: Some(receiver.0.to_string()),
            receiver_id: Some(receiver.1.to_string()),
            is_private: true,
            ..public(id, sender.0, sender.1, text)
        }
    }

    fn user(name: &str, id: &str) -> UserDto {
        UserDto {
            username: name.to_string(),
            id: id.to_string(),
        }
    }

    fn page(ids: std::ops::RangeInclusive<u64>, total: usize) -> MessagesPageDto {
        let messages: Vec<MessageDto> = ids
            .map(|id| public(id, "bob", "b1", &format!("m{}", id)))
            .collect();
        MessagesPageDto {
            offset: 0,
            limit: messages.len(),
            total,
            messages,
        }
    }

    fn connected_alice() -> ClientState {
        let mut state = ClientState::new("alice");
        state.apply(ServerEvent::Connected {
            connection_id: "a1".to_string(),
        });
        state
    }

    #[test]
    fn test_history_pages_drive_pagination_counters() {
        // テスト項目: 履歴ページで offset/total/has_more が更新され、古いページは先頭に挿入される
        // given (前提条件):
        let mut state = connected_alice();

        // when (操作):
        state.apply_history_page(page(6..=25, 25));
        let first_request = state.next_page_request(20);
        state.apply_history_page(page(1..=5, 25));

        // then (期待する結果):
        assert_eq!(first_request, Some((20, 20)));
        assert_eq!(state.offset(), 25);
        assert!(!state.has_more());
        assert_eq!(state.next_page_request(20), None);
        let ids: Vec<u64> = state.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
    }

    #[test]
    fn test_empty_page_stops_paging() {
        // テスト項目: 空のページが返ると offset は進まず、それ以上のページ要求は行われない
        // given (前提条件):
        let mut state = connected_alice();
        state.apply_history_page(page(6..=25, 25));

        // when (操作):
        let added = state.apply_history_page(MessagesPageDto {
            offset: 20,
            limit: 0,
            total: 25,
            messages: Vec::new(),
        });

        // then (期待する結果):
        assert_eq!(added, 0);
        assert_eq!(state.offset(), 20);
        assert!(!state.has_more());
        assert_eq!(state.next_page_request(20), None);
    }

    #[test]
    fn test_live_events_do_not_move_pagination() {
        // テスト項目: ライブのメッセージでは offset/total は変わらない
        // given (前提条件):
        let mut state = connected_alice();
        state.apply_history_page(page(1..=3, 3));

        // when (操作):
        state.apply(ServerEvent::ReceiveMessage(public(4, "bob", "b1", "live")));

        // then (期待する結果):
        assert_eq!(state.offset(), 3);
        assert_eq!(state.total(), 3);
        assert_eq!(state.messages().len(), 4);
    }

    #[test]
    fn test_duplicate_message_is_merged_once() {
        // テスト項目: ライブと履歴の両方で届いたメッセージは 1 件として扱われる
        // given (前提条件):
        let mut state = connected_alice();
        state.apply(ServerEvent::ReceiveMessage(public(3, "bob", "b1", "hi")));

        // when (操作):
        let added = state.apply_history_page(page(1..=3, 3));
        let repeat = state.apply(ServerEvent::ReceiveMessage(public(3, "bob", "b1", "hi")));

        // then (期待する結果):
        assert_eq!(added, 2);
        assert_eq!(repeat, StateChange::Unchanged);
        let ids: Vec<u64> = state.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_private_isolation_for_third_party() {
        // テスト項目: A→B のプライベートメッセージは C の公開フィードにも C のスレッドにも現れない
        // given (前提条件):
        let mut carol = ClientState::new("carol");
        carol.apply(ServerEvent::Connected {
            connection_id: "c1".to_string(),
        });
        let message = private(1, ("alice", "a1"), ("bob", "b1"), "secret");

        // when (操作):
        carol.apply(ServerEvent::PrivateMessage(message));

        // then (期待する結果):
        assert!(carol.public_view().is_empty());
        assert!(carol.private_thread_view(&user("alice", "a1")).is_empty());
        assert!(carol.private_thread_view(&user("bob", "b1")).is_empty());
    }

    #[test]
    fn test_private_thread_view_matches_both_directions() {
        // テスト項目: 自分と相手の間のメッセージだけがスレッドに表示され、公開フィードには出ない
        // given (前提条件):
        let mut alice = connected_alice();
        let bob = user("bob", "b1");
        alice.apply(ServerEvent::PrivateMessage(private(1, ("alice", "a1"), ("bob", "b1"), "hi bob")));
        alice.apply(ServerEvent::PrivateMessage(private(2, ("bob", "b1"), ("alice", "a1"), "hi alice")));
        alice.apply(ServerEvent::PrivateMessage(private(3, ("dave", "d1"), ("alice", "a1"), "other")));
        alice.apply(ServerEvent::ReceiveMessage(public(4, "bob", "b1", "public")));

        // when (操作):
        let thread: Vec<u64> = alice.private_thread_view(&bob).iter().map(|m| m.id).collect();
        let feed: Vec<u64> = alice.public_view().iter().map(|m| m.id).collect();

        // then (期待する結果):
        assert_eq!(thread, vec![1, 2]);
        assert_eq!(feed, vec![4]);
    }

    #[test]
    fn test_thread_match_breaks_after_peer_reconnects() {
        // テスト項目: 相手が再接続して接続 ID が変わると、以前のメッセージはスレッドに一致しない
        // given (前提条件):
        let mut alice = connected_alice();
        alice.apply(ServerEvent::PrivateMessage(private(1, ("bob", "b1"), ("alice", "a1"), "before")));

        // when (操作):
        let reconnected_bob = user("bob", "b2");

        // then (期待する結果):
        assert!(alice.private_thread_view(&reconnected_bob).is_empty());
    }

    #[test]
    fn test_read_requests_follow_active_view() {
        // テスト項目: 表示中のビューにある未読メッセージだけ read が 1 回ずつ発行される
        // given (前提条件):
        let mut alice = connected_alice();
        alice.apply(ServerEvent::ReceiveMessage(public(1, "bob", "b1", "one")));
        alice.apply(ServerEvent::ReceiveMessage(public(2, "bob", "b1", "two")));
        alice.apply(ServerEvent::ReadReceipt {
            message_id: 2,
            readers: vec!["alice".to_string()],
        });
        alice.apply(ServerEvent::PrivateMessage(private(3, ("bob", "b1"), ("alice", "a1"), "psst")));

        // when (操作):
        let public_reads = alice.drain_read_requests();
        let repeated = alice.drain_read_requests();
        alice.select_private_peer(Some(user("bob", "b1")));
        let thread_reads = alice.drain_read_requests();

        // then (期待する結果):
        assert_eq!(
            public_reads,
            vec![ClientEvent::Read {
                message_id: 1,
                username: Some("alice".to_string()),
            }]
        );
        assert!(repeated.is_empty());
        assert_eq!(
            thread_reads,
            vec![ClientEvent::Read {
                message_id: 3,
                username: Some("alice".to_string()),
            }]
        );
    }

    #[test]
    fn test_reaction_is_merged_without_duplicates() {
        // テスト項目: 同じユーザーの同じリアクションは 1 回だけ記録される
        // given (前提条件):
        let mut state = connected_alice();
        state.apply(ServerEvent::ReceiveMessage(public(1, "bob", "b1", "hi")));
        let reaction = ServerEvent::Reaction {
            message_id: 1,
            emoji: "👍".to_string(),
            user: "bob".to_string(),
        };

        // when (操作):
        state.apply(reaction.clone());
        state.apply(reaction);

        // then (期待する結果):
        assert_eq!(state.messages()[0].reactions["👍"], vec!["bob".to_string()]);
    }

    #[test]
    fn test_typing_excludes_self_and_hides_in_private_view() {
        // テスト項目: 入力中表示に自分は含まれず、プライベートスレッド表示中は隠れる
        // given (前提条件):
        let mut state = connected_alice();

        // when (操作):
        state.apply(ServerEvent::TypingUsers {
            users: vec!["alice".to_string(), "bob".to_string()],
        });

        // then (期待する結果):
        assert_eq!(state.visible_typing(), ["bob".to_string()]);
        state.select_private_peer(Some(user("bob", "b1")));
        assert!(state.visible_typing().is_empty());
    }

    #[test]
    fn test_search_filters_text_and_file_name() {
        // テスト項目: 検索は本文とファイル名に対して大文字小文字を区別せずに一致する
        // given (前提条件):
        let mut state = connected_alice();
        state.apply(ServerEvent::ReceiveMessage(public(1, "bob", "b1", "Hello there")));
        state.apply(ServerEvent::ReceiveMessage(public(2, "bob", "b1", "bye")));
        let mut file = public(3, "bob", "b1", "");
        file.message = None;
        file.file_name = Some("HELLO.png".to_string());
        state.apply(ServerEvent::FileMessage(file));

        // when (操作):
        state.set_search("hello");

        // then (期待する結果):
        let ids: Vec<u64> = state.active_view().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
