//! Repository trait 定義
//!
//! ドメイン層が必要とする Presence Registry へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, Participant, Timestamp};

/// Presence Registry trait
///
/// 「誰がいるか」の唯一の情報源。接続ごとに高々 1 人の参加者を保持し、
/// `count()` が常にオンライン人数の正となる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 参加者を登録（既存のエントリは上書き）し、登録後の人数を返す
    async fn join(&self, connection_id: ConnectionId, name: DisplayName, at: Timestamp) -> usize;

    /// 参加者を削除し、登録されていた表示名を返す
    async fn leave(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 接続に紐づく表示名を取得
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// 現在の参加者数
    async fn count(&self) -> usize;

    /// 参加者一覧（join 時刻順）
    async fn participants(&self) -> Vec<Participant>;
}
