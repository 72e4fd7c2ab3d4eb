//! UseCase: タイピング通知の中継
//!
//! サーバーはタイピング状態を保持しません。join 済みの接続から届いた
//! シグナルを、送信者以外の全ての接続にそのまま中継するだけです。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PresenceRepository, ServerEvent};

use super::{EventSequencer, error::TypingError};

/// タイピング通知中継のユースケース
pub struct RelayTypingUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    sequencer: Arc<EventSequencer>,
}

impl RelayTypingUseCase {
    /// 新しい RelayTypingUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            sequencer,
        }
    }

    /// タイピング状態を送信者以外に中継
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        is_typing: bool,
    ) -> Result<(), TypingError> {
        let _turn = self.sequencer.enter().await;

        let name = self
            .repository
            .lookup(connection_id)
            .await
            .ok_or(TypingError::NotJoined)?;

        self.message_pusher
            .broadcast(&ServerEvent::Typing { name, is_typing }, Some(connection_id))
            .await?;

        Ok(())
    }
}
