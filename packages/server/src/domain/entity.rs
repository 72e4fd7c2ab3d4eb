//! Domain entities.

use super::value_object::{ConnectionId, DisplayName, MessageText, Timestamp};

/// 表示名に紐づいた接続（Presence Registry の 1 エントリ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            name,
            joined_at,
        }
    }
}

/// 中継時に生成されるチャットメッセージ（保存されない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// 送信者名（Registry に登録された名前。クライアント申告の値ではない）
    pub sender: DisplayName,
    pub text: MessageText,
    pub sent_at: Timestamp,
}

impl ChatMessage {
    pub fn new(sender: DisplayName, text: MessageText, sent_at: Timestamp) -> Self {
        Self {
            sender,
            text,
            sent_at,
        }
    }
}
