//! MessagePusher trait 定義
//!
//! ドメイン層が必要とする「接続へのイベント送信」のインターフェース。
//! join 前の接続も含め、トランスポート上の全ての接続を対象とします。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerEvent};

/// 接続ごとの送信チャンネル（シリアライズ済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// 全ての接続にイベントを送信（`excluding` を指定した場合はその接続を除く）
    async fn broadcast(
        &self,
        event: &ServerEvent,
        excluding: Option<&ConnectionId>,
    ) -> Result<(), MessagePushError>;

    /// 登録中の接続数
    async fn connection_count(&self) -> usize;
}
