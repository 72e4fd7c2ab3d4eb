//! UseCase: join 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - 表示名の検証、Registry への登録、presence-joined / user-count の配信先
//!
//! ### どのような状況を想定しているか
//! - 正常系：join した本人には presence-joined が届かず、user-count は全員に届く
//! - 異常系：空・長すぎる表示名は Registry を変更せず、本人にだけ rejected が届く
//! - エッジケース：同じ接続での再 join（上書き、人数は変わらない）

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayName, MessagePusher, PresenceRepository, ServerEvent, Timestamp,
};

use super::{EventSequencer, error::JoinError};

/// join のユースケース
pub struct JoinChatUseCase {
    /// Repository（Presence Registry の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
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

    /// join を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - join する接続
    /// * `raw_name` - クライアントから受け取った表示名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - join 後のオンライン人数
    /// * `Err(JoinError)` - 表示名が不正、または配信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_name: String,
    ) -> Result<usize, JoinError> {
        let _turn = self.sequencer.enter().await;

        // 1. 表示名の検証（不正なら本人にだけ通知して終了）
        let name = match DisplayName::new(raw_name) {
            Ok(name) => name,
            Err(e) => {
                let rejected = ServerEvent::Rejected {
                    reason: e.to_string(),
                };
                if let Err(push_err) = self.message_pusher.push_to(connection_id, &rejected).await
                {
                    tracing::warn!("Failed to notify rejected join: {}", push_err);
                }
                return Err(JoinError::InvalidName(e));
            }
        };

        // 2. Registry に登録
        let at = Timestamp::new(self.clock.now_millis());
        let count = self
            .repository
            .join(connection_id.clone(), name.clone(), at)
            .await;
        tracing::info!("{} joined the chat", name);

        // 3. 本人以外に presence-joined、全員に user-count
        self.message_pusher
            .broadcast(&ServerEvent::PresenceJoined { name, at }, Some(connection_id))
            .await?;
        self.message_pusher
            .broadcast(&ServerEvent::UserCount(count), None)
            .await?;

        Ok(count)
    }
}
