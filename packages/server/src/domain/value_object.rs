//! Value Objects
//!
//! 不変条件（長さ制限など）を生成時に検証する値オブジェクト。
//! 生成に成功した値は常に有効であることが型で保証されます。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// 表示名の最大文字数（trim 後）
pub const MAX_DISPLAY_NAME_LENGTH: usize = 20;

/// メッセージ本文の最大文字数（trim 後）
pub const MAX_MESSAGE_TEXT_LENGTH: usize = 500;

/// 1 本のトランスポートセッションを表すサーバー採番の識別子
///
/// 接続ごとに新しく生成され、再利用されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
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

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ConnectionId の生成
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 から新しい ConnectionId を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(Uuid::new_v4().to_string())
    }
}

/// Validate trimmed text length in characters, returning the trimmed text.
fn trimmed_within(raw: &str, max: usize) -> Result<String, (usize, usize)> {
    let trimmed = raw.trim();
    let actual = trimmed.chars().count();
    if actual == 0 || actual > max {
        return Err((actual, max));
    }
    Ok(trimmed.to_string())
}

/// 参加者の表示名（trim 後 1〜20 文字）
///
/// 一意性は検証しない。同じ名前の参加者が複数存在してよい。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: String) -> Result<Self, ValueObjectError> {
        match trimmed_within(&raw, MAX_DISPLAY_NAME_LENGTH) {
            Ok(name) => Ok(Self(name)),
            Err((0, _)) => Err(ValueObjectError::DisplayNameEmpty),
            Err((actual, max)) => Err(ValueObjectError::DisplayNameTooLong { max, actual }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// チャットメッセージ本文（trim 後 1〜500 文字）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(raw: String) -> Result<Self, ValueObjectError> {
        match trimmed_within(&raw, MAX_MESSAGE_TEXT_LENGTH) {
            Ok(text) => Ok(Self(text)),
            Err((0, _)) => Err(ValueObjectError::MessageTextEmpty),
            Err((actual, max)) => Err(ValueObjectError::MessageTextTooLong { max, actual }),
        }
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

/// Unix タイムスタンプ（ミリ秒）
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_is_trimmed() {
        // テスト項目: 表示名の前後の空白が取り除かれる
        // given (前提条件):
        let raw = "  Alice  ".to_string();

        // when (操作):
        let name = DisplayName::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn test_display_name_empty_after_trim_is_rejected() {
        // テスト項目: trim 後に空になる表示名は拒否される
        // given (前提条件):
        let raw = "   ".to_string();

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::DisplayNameEmpty));
    }

    #[test]
    fn test_display_name_at_max_length_is_accepted() {
        // テスト項目: ちょうど 20 文字の表示名は受け入れられる
        // given (前提条件):
        let raw = "a".repeat(MAX_DISPLAY_NAME_LENGTH);

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_display_name_over_max_length_is_rejected() {
        // テスト項目: 21 文字の表示名は拒否される
        // given (前提条件):
        let raw = "a".repeat(MAX_DISPLAY_NAME_LENGTH + 1);

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::DisplayNameTooLong {
                max: 20,
                actual: 21
            })
        );
    }

    #[test]
    fn test_display_name_counts_characters_not_bytes() {
        // テスト項目: マルチバイト文字はバイト数ではなく文字数で数えられる
        // given (前提条件):
        let raw = "あ".repeat(MAX_DISPLAY_NAME_LENGTH);

        // when (操作):
        let result = DisplayName::new(raw);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_message_text_boundaries() {
        // テスト項目: メッセージ本文は trim 後 1〜500 文字のみ受け入れられる
        // given (前提条件):
        let empty = " \n\t ".to_string();
        let max = "x".repeat(MAX_MESSAGE_TEXT_LENGTH);
        let too_long = "x".repeat(MAX_MESSAGE_TEXT_LENGTH + 1);

        // when (操作):
        let empty_result = MessageText::new(empty);
        let max_result = MessageText::new(max);
        let too_long_result = MessageText::new(too_long);

        // then (期待する結果):
        assert_eq!(empty_result, Err(ValueObjectError::MessageTextEmpty));
        assert!(max_result.is_ok());
        assert_eq!(
            too_long_result,
            Err(ValueObjectError::MessageTextTooLong {
                max: 500,
                actual: 501
            })
        );
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionIdFactory::generate();
        let second = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn test_connection_id_rejects_empty_string() {
        // テスト項目: 空文字列の ConnectionId は生成できない
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = ConnectionId::new(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::ConnectionIdEmpty));
    }
}
