//! Outbound events produced by the broadcast router.

use super::{
    entity::ChatMessage,
    value_object::{DisplayName, Timestamp},
};

/// サーバーからクライアントへ送られるイベント
///
/// ワイヤーフォーマットへの変換は Infrastructure 層（DTO）が担当します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// 参加者が join した（送信者以外へ）
    PresenceJoined { name: DisplayName, at: Timestamp },
    /// 参加者が切断した（送信者以外へ）
    PresenceLeft { name: DisplayName, at: Timestamp },
    /// 現在のオンライン人数（全員へ）
    UserCount(usize),
    /// チャットメッセージ（送信者を含む全員へ）
    ChatMessage(ChatMessage),
    /// タイピング状態（送信者以外へ）
    Typing { name: DisplayName, is_typing: bool },
    /// 入力が拒否された（送信者のみへ）
    Rejected { reason: String },
}
