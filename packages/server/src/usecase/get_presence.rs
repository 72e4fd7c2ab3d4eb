//! UseCase: 現在のオンライン状況の取得

use std::sync::Arc;

use crate::domain::{Participant, PresenceRepository};

/// Registry のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub count: usize,
    pub participants: Vec<Participant>,
}

/// オンライン状況取得のユースケース（読み取り専用）
pub struct GetPresenceUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetPresenceUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> PresenceSnapshot {
        let participants = self.repository.participants().await;
        PresenceSnapshot {
            count: participants.len(),
            participants,
        }
    }
}
