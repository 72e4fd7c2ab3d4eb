//! Domain layer for the chat broadcaster.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Participant};
pub use error::{MessagePushError, ValueObjectError};
pub use event::ServerEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::PresenceRepository;
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DisplayName, MAX_DISPLAY_NAME_LENGTH,
    MAX_MESSAGE_TEXT_LENGTH, MessageText, Timestamp,
};
