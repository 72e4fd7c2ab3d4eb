//! UseCase layer: the broadcast router.
//!
//! Each inbound event has its own use case. They share the Presence Registry,
//! the MessagePusher, a clock and an [`EventSequencer`], so that handling one
//! event (registry mutation plus fan-out) never interleaves with another.

mod connect_client;
mod disconnect_participant;
mod error;
mod get_presence;
mod join_chat;
mod relay_typing;
mod send_message;

use tokio::sync::{Mutex, MutexGuard};

pub use connect_client::ConnectClientUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{DisconnectError, JoinError, SendMessageError, TypingError};
pub use get_presence::{GetPresenceUseCase, PresenceSnapshot};
pub use join_chat::JoinChatUseCase;
pub use relay_typing::RelayTypingUseCase;
pub use send_message::SendMessageUseCase;

/// Serializes event handling across all connections.
///
/// The guard is held for the whole of one event: registry update and every
/// broadcast it causes. Pushes only enqueue into unbounded channels, so the
/// critical section never waits on a socket.
#[derive(Debug, Default)]
pub struct EventSequencer {
    lock: Mutex<()>,
}

impl EventSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the current event to finish and take the turn.
    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use hiroba_shared::time::FixedClock;
    use serde_json::Value;
    use tokio::sync::mpsc;

    use super::EventSequencer;
    use crate::{
        domain::{ConnectionId, MessagePusher},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository,
        },
    };

    pub const NOW: i64 = 1672531200000;

    /// In-memory registry and pusher wired together, with receivers per connection.
    pub struct Harness {
        pub repository: Arc<InMemoryPresenceRepository>,
        pub message_pusher: Arc<WebSocketMessagePusher>,
        pub clock: Arc<FixedClock>,
        pub sequencer: Arc<EventSequencer>,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                repository: Arc::new(InMemoryPresenceRepository::new()),
                message_pusher: Arc::new(WebSocketMessagePusher::new()),
                clock: Arc::new(FixedClock::new(NOW)),
                sequencer: Arc::new(EventSequencer::new()),
            }
        }

        /// Register a fresh (anonymous) connection with the pusher.
        pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let connection_id = crate::domain::ConnectionIdFactory::generate();
            self.message_pusher
                .register_client(connection_id.clone(), tx)
                .await;
            (connection_id, rx)
        }
    }

    /// Take every frame queued so far, parsed as JSON.
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(text) = rx.try_recv() {
            frames.push(serde_json::from_str(&text).unwrap());
        }
        frames
    }

    /// The `type` tags of the given frames, in order.
    pub fn types(frames: &[Value]) -> Vec<&str> {
        frames
            .iter()
            .map(|frame| frame["type"].as_str().unwrap_or_default())
            .collect()
    }
}
