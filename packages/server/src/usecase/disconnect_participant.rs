//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - Registry / Pusher からの削除と presence-left / user-count の配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：join 済みの参加者の切断（残りの全員に通知）
//! - エッジケース：join 前に切断した接続（何も配信されない）
//! - エッジケース：N 人 join、M 人切断後の人数が N−M になる

use std::sync::Arc;

use hiroba_shared::time::Clock;

use crate::domain::{
    ConnectionId, DisplayName, MessagePusher, PresenceRepository, ServerEvent, Timestamp,
};

use super::{EventSequencer, error::DisconnectError};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（Presence Registry の抽象化）
    repository: Arc<dyn PresenceRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    sequencer: Arc<EventSequencer>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
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

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(DisplayName))` - 参加者だった接続の切断（通知済み）
    /// * `Ok(None)` - join していなかった接続の切断（通知なし）
    /// * `Err(DisconnectError)` - 配信失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<DisplayName>, DisconnectError> {
        let _turn = self.sequencer.enter().await;

        // 1. MessagePusher から登録解除
        self.message_pusher.unregister_client(connection_id).await;

        // 2. Registry から削除
        let Some(name) = self.repository.leave(connection_id).await else {
            return Ok(None);
        };
        tracing::info!("{} left the chat", name);

        // 3. 残りの接続に presence-left と user-count
        let at = Timestamp::new(self.clock.now_millis());
        self.message_pusher
            .broadcast(
                &ServerEvent::PresenceLeft {
                    name: name.clone(),
                    at,
                },
                Some(connection_id),
            )
            .await?;
        let count = self.repository.count().await;
        self.message_pusher
            .broadcast(&ServerEvent::UserCount(count), None)
            .await?;

        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        JoinChatUseCase,
        test_support::{Harness, drain, types},
    };
    use serde_json::json;

    fn usecases(harness: &Harness) -> (JoinChatUseCase, DisconnectParticipantUseCase) {
        let join = JoinChatUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
            harness.clock.clone(),
            harness.sequencer.clone(),
        );
        let disconnect = DisconnectParticipantUseCase::new(
            harness.repository.clone(),
            harness.message_pusher.clone(),
            harness.clock.clone(),
            harness.sequencer.clone(),
        );
        (join, disconnect)
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_participants() {
        // テスト項目: A が切断すると B は presence-left{Alice} と user-count=1 を受け取る
        // given (前提条件):
        let harness = Harness::new();
        let (join, disconnect) = usecases(&harness);
        let (alice, _alice_rx) = harness.connect().await;
        let (bob, mut bob_rx) = harness.connect().await;
        join.execute(&alice, "Alice".to_string()).await.unwrap();
        join.execute(&bob, "Bob".to_string()).await.unwrap();
        drain(&mut bob_rx);

        // when (操作):
        let result = disconnect.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Some(DisplayName::new("Alice".to_string()).unwrap()))
        );
        let bob_frames = drain(&mut bob_rx);
        assert_eq!(types(&bob_frames), vec!["presence-left", "user-count"]);
        assert_eq!(bob_frames[0]["username"], "Alice");
        assert_eq!(bob_frames[0]["message"], "Alice left the chat");
        assert_eq!(bob_frames[1], json!({"type": "user-count", "count": 1}));
        assert_eq!(harness.message_pusher.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_before_join_is_silent() {
        // テスト項目: join 前に切断した接続では何も配信されない
        // given (前提条件):
        let harness = Harness::new();
        let (join, disconnect) = usecases(&harness);
        let (anonymous, _anonymous_rx) = harness.connect().await;
        let (bob, mut bob_rx) = harness.connect().await;
        join.execute(&bob, "Bob".to_string()).await.unwrap();
        drain(&mut bob_rx);

        // when (操作):
        let result = disconnect.execute(&anonymous).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert!(drain(&mut bob_rx).is_empty());
        assert_eq!(harness.repository.count().await, 1);
        assert_eq!(harness.message_pusher.connection_count().await, 1);
    }

    #[tokio::test]
    async fn test_count_after_joins_and_disconnects() {
        // テスト項目: N 人 join し M 人切断した後の user-count は N−M になる
        // given (前提条件):
        let harness = Harness::new();
        let (join, disconnect) = usecases(&harness);
        let (observer, mut observer_rx) = harness.connect().await;
        join.execute(&observer, "Observer".to_string()).await.unwrap();
        let mut others = Vec::new();
        for i in 0..4 {
            let (conn, rx) = harness.connect().await;
            join.execute(&conn, format!("user{}", i)).await.unwrap();
            others.push((conn, rx));
        }

        // when (操作): 5 人 join 済みのうち 2 人が切断
        for (conn, _rx) in others.iter().take(2) {
            disconnect.execute(conn).await.unwrap();
        }

        // then (期待する結果):
        let counts: Vec<u64> = drain(&mut observer_rx)
            .iter()
            .filter(|frame| frame["type"] == "user-count")
            .filter_map(|frame| frame["count"].as_u64())
            .collect();
        assert_eq!(counts.last(), Some(&3));
        assert_eq!(harness.repository.count().await, 3);
    }

    #[tokio::test]
    async fn test_departing_connection_receives_nothing() {
        // テスト項目: 切断した接続自身には presence-left も user-count も届かない
        // given (前提条件):
        let harness = Harness::new();
        let (join, disconnect) = usecases(&harness);
        let (alice, mut alice_rx) = harness.connect().await;
        join.execute(&alice, "Alice".to_string()).await.unwrap();
        drain(&mut alice_rx);

        // when (操作):
        disconnect.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert!(drain(&mut alice_rx).is_empty());
    }
}
