//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者名は Registry に登録された名前が使われること
//! - メッセージは送信者を含む全ての接続に届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みの接続からの送信
//! - 異常系：join していない接続からの送信（何も配信されない）
//! - 異常系：空・長すぎる本文（本人にだけ rejected）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePusher, MessageText, PresenceRepository, ServerEvent,
    Timestamp,
};

use super::{EventSequencer, error::SendMessageError};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（Presence Registry の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        sequencer: Arc<EventSequencer>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            sequencer,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 送信元の接続
    /// * `raw_text` - クライアントから受け取った本文（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 配信したメッセージ
    /// * `Err(SendMessageError)` - 未 join、本文が不正、または配信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_text: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let _turn = self.sequencer.enter().await;

        // 1. 送信者を特定（join していなければ黙って破棄）
        let sender = self
            .repository
            .lookup(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?;

        // 2. 本文の検証
        let text = match MessageText::new(raw_text) {
            Ok(text) => text,
            Err(e) => {
                let rejected = ServerEvent::Rejected {
                    reason: e.to_string(),
                };
                if let Err(push_err) = self.message_pusher.push_to(connection_id, &rejected).await
                {
                    tracing::warn!("Failed to notify rejected message: {}", push_err);
                }
                return Err(SendMessageError::InvalidMessage(e));
            }
        };

        // 3. 送信者を含む全員に配信
        let message = ChatMessage::new(sender, text, Timestamp::new(self.clock.now_millis()));
        tracing::info!("{}: {}", message.sender, message.text.as_str());
        self.message_pusher
            .broadcast(&ServerEvent::ChatMessage(message.clone()), None)
            .await?;

        Ok(message)
    }
}
