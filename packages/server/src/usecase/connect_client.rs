//! UseCase: 接続受付処理
//!
//! 新しい接続に ConnectionId を採番し、MessagePusher に登録します。
//! この時点ではまだ参加者ではありません（Anonymous）。join 前の接続も
//! 「全員」宛てのブロードキャスト（user-count, chat-message）は受信します。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

use super::EventSequencer;

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, sequencer: Arc<EventSequencer>) -> Self {
        Self {
            message_pusher,
            sequencer,
        }
    }

    /// 接続を登録し、採番した ConnectionId を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let _turn = self.sequencer.enter().await;

        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        connection_id
    }
}
