//! Value objects for the chat domain.
//!
//! Each value object validates its invariant on construction, so the rest of
//! the domain can rely on e.g. an [`Identity`] never being blank.

use std::fmt;

use super::error::ValueObjectError;

/// Fallback display identity for connections that have not joined.
pub const ANONYMOUS_IDENTITY: &str = "Anonymous";

/// Opaque identifier of one live connection, assigned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display identity chosen by a user on join.
///
/// Surrounding whitespace is trimmed; a blank identity is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyIdentity);
        }
        if trimmed.len() == value.len() {
            Ok(Self(value))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// The sentinel identity used when a connection has not joined yet.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_IDENTITY.to_string())
    }

    pub fn is_anonymous(&self) -> bool {
        self.0 == ANONYMOUS_IDENTITY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic message identifier, unique within the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock time in Unix milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Body of a text message. Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessage);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A reaction symbol such as an emoji.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReactionSymbol(String);

impl ReactionSymbol {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyReactionSymbol);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReactionSymbol {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_trims_surrounding_whitespace() {
        // テスト項目: Identity は前後の空白を除去して保持する
        // given (前提条件):
        let raw = "  alice ".to_string();

        // when (操作):
        let identity = Identity::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(identity.as_str(), "alice");
    }

    #[test]
    fn test_identity_rejects_blank() {
        // テスト項目: 空白のみの Identity はエラーになる
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = Identity::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyIdentity));
    }

    #[test]
    fn test_anonymous_identity() {
        // テスト項目: 匿名 Identity は "Anonymous" になる
        // given (前提条件):

        // when (操作):
        let identity = Identity::anonymous();

        // then (期待する結果):
        assert_eq!(identity.as_str(), "Anonymous");
        assert!(identity.is_anonymous());
    }

    #[test]
    fn test_message_text_rejects_blank() {
        // テスト項目: 空のメッセージ本文はエラーになる
        // given (前提条件):
        let raw = "\n\t".to_string();

        // when (操作):
        let result = MessageText::try_from(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyMessage));
    }

    #[test]
    fn test_message_id_ordering() {
        // テスト項目: MessageId は数値順に比較される
        // given (前提条件):
        let older = MessageId::new(1);
        let newer = MessageId::new(2);

        // when (操作):
        let ordered = older < newer;

        // then (期待する結果):
        assert!(ordered);
    }
}
