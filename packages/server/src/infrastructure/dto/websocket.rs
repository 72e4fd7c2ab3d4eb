//! WebSocket event DTOs.
//!
//! Every frame is a JSON object tagged by `"type"`:
//!
//! ```text
//! {"type":"join","username":"Alice"}
//! {"type":"chat-message","message":"hi"}
//! {"type":"typing","isTyping":true}
//! ```

use serde::{Deserialize, Serialize};

/// Events sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        username: String,
    },
    ChatMessage {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Typing {
        is_typing: bool,
    },
}

/// Join / leave notice shown as a system message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceNotice {
    pub username: String,
    pub message: String,
    pub timestamp: String,
}

/// Chat message relayed to every connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub username: String,
    pub message: String,
    pub timestamp: String,
}

/// Typing signal relayed to everyone but the typist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub username: String,
    pub is_typing: bool,
}

/// Events sent from the server to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    PresenceJoined(PresenceNotice),
    PresenceLeft(PresenceNotice),
    UserCount { count: usize },
    ChatMessage(ChatPayload),
    Typing(TypingPayload),
    Rejected { reason: String },
}
