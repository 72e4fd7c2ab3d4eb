//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセスが終了すると
//! 全ての参加者情報は失われます（永続化しない）。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, DisplayName, Participant, PresenceRepository, Timestamp};

/// インメモリ Presence Repository 実装
///
/// Key: ConnectionId, Value: Participant。接続ごとに高々 1 エントリ。
#[derive(Default)]
pub struct InMemoryPresenceRepository {
    participants: Mutex<HashMap<ConnectionId, Participant>>,
}

impl InMemoryPresenceRepository {
    /// 空の InMemoryPresenceRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn join(&self, connection_id: ConnectionId, name: DisplayName, at: Timestamp) -> usize {
        let mut participants = self.participants.lock().await;
        let participant = Participant::new(connection_id.clone(), name, at);
        if participants.insert(connection_id, participant).is_some() {
            tracing::debug!("Participant entry overwritten by re-join");
        }
        participants.len()
    }

    async fn leave(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let mut participants = self.participants.lock().await;
        participants.remove(connection_id).map(|p| p.name)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let participants = self.participants.lock().await;
        participants.get(connection_id).map(|p| p.name.clone())
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }

    async fn participants(&self) -> Vec<Participant> {
        let participants = self.participants.lock().await;
        let mut list: Vec<Participant> = participants.values().cloned().collect();
        list.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        list
    }
}
