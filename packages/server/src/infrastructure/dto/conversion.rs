//! Conversion logic between domain values and DTOs.

use hiroba_shared::time::{format_local_time, timestamp_to_local_rfc3339};

use crate::domain::{Participant, ServerEvent};
use crate::infrastructure::dto::{http, websocket as dto};

/// Convert a domain event into its wire form, formatting timestamps with `format_time`.
pub fn to_server_message(event: &ServerEvent, format_time: fn(i64) -> String) -> dto::ServerMessage {
    match event {
        ServerEvent::PresenceJoined { name, at } => {
            dto::ServerMessage::PresenceJoined(dto::PresenceNotice {
                username: name.as_str().to_string(),
                message: format!("{} joined the chat", name),
                timestamp: format_time(at.value()),
            })
        }
        ServerEvent::PresenceLeft { name, at } => {
            dto::ServerMessage::PresenceLeft(dto::PresenceNotice {
                username: name.as_str().to_string(),
                message: format!("{} left the chat", name),
                timestamp: format_time(at.value()),
            })
        }
        ServerEvent::UserCount(count) => dto::ServerMessage::UserCount { count: *count },
        ServerEvent::ChatMessage(message) => dto::ServerMessage::ChatMessage(dto::ChatPayload {
            username: message.sender.as_str().to_string(),
            message: message.text.as_str().to_string(),
            timestamp: format_time(message.sent_at.value()),
        }),
        ServerEvent::Typing { name, is_typing } => dto::ServerMessage::Typing(dto::TypingPayload {
            username: name.as_str().to_string(),
            is_typing: *is_typing,
        }),
        ServerEvent::Rejected { reason } => dto::ServerMessage::Rejected {
            reason: reason.clone(),
        },
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        to_server_message(event, format_local_time)
    }
}

impl From<Participant> for http::ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            username: model.name.into_string(),
            joined_at: timestamp_to_local_rfc3339(model.joined_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, DisplayName, MessageText, Timestamp};

    fn fake_time(millis: i64) -> String {
        format!("t{}", millis)
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_presence_joined_to_dto() {
        // テスト項目: PresenceJoined が通知メッセージ付きの DTO に変換される
        // given (前提条件):
        let event = ServerEvent::PresenceJoined {
            name: name("Alice"),
            at: Timestamp::new(1000),
        };

        // when (操作):
        let msg = to_server_message(&event, fake_time);

        // then (期待する結果):
        assert_eq!(
            msg,
            dto::ServerMessage::PresenceJoined(dto::PresenceNotice {
                username: "Alice".to_string(),
                message: "Alice joined the chat".to_string(),
                timestamp: "t1000".to_string(),
            })
        );
    }

    #[test]
    fn test_presence_left_to_dto() {
        // テスト項目: PresenceLeft が "left the chat" の通知に変換される
        // given (前提条件):
        let event = ServerEvent::PresenceLeft {
            name: name("Bob"),
            at: Timestamp::new(2000),
        };

        // when (操作):
        let msg = to_server_message(&event, fake_time);

        // then (期待する結果):
        match msg {
            dto::ServerMessage::PresenceLeft(notice) => {
                assert_eq!(notice.username, "Bob");
                assert_eq!(notice.message, "Bob left the chat");
                assert_eq!(notice.timestamp, "t2000");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_chat_message_to_dto() {
        // テスト項目: ChatMessage が送信者名・本文・時刻を持つ DTO に変換される
        // given (前提条件):
        let event = ServerEvent::ChatMessage(ChatMessage::new(
            name("Alice"),
            MessageText::new("hi".to_string()).unwrap(),
            Timestamp::new(3000),
        ));

        // when (操作):
        let msg = to_server_message(&event, fake_time);

        // then (期待する結果):
        assert_eq!(
            msg,
            dto::ServerMessage::ChatMessage(dto::ChatPayload {
                username: "Alice".to_string(),
                message: "hi".to_string(),
                timestamp: "t3000".to_string(),
            })
        );
    }

    #[test]
    fn test_participant_to_http_dto() {
        // テスト項目: Participant が HTTP DTO に変換される
        // given (前提条件):
        let participant = crate::domain::Participant::new(
            crate::domain::ConnectionIdFactory::generate(),
            name("Carol"),
            Timestamp::new(1672531200000),
        );

        // when (操作):
        let dto: http::ParticipantDto = participant.into();

        // then (期待する結果):
        assert_eq!(dto.username, "Carol");
        assert!(dto.joined_at.starts_with("2023-01-01") || dto.joined_at.starts_with("2022-12-31"));
    }
}
