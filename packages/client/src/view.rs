//! Client-side view state: who is typing and how many users are online.

use hiroba_server::infrastructure::dto::websocket::ServerMessage;

use crate::formatter::MessageFormatter;

/// Rendered state of the chat as seen by one participant
#[derive(Debug)]
pub struct ChatView {
    own_name: String,
    typing_users: Vec<String>,
    online: usize,
}

impl ChatView {
    pub fn new(own_name: impl Into<String>) -> Self {
        Self {
            own_name: own_name.into(),
            typing_users: Vec::new(),
            online: 0,
        }
    }

    pub fn typing_users(&self) -> &[String] {
        &self.typing_users
    }

    pub fn online(&self) -> usize {
        self.online
    }

    /// Forget transient state after the connection drops.
    pub fn reset(&mut self) {
        self.typing_users.clear();
    }

    /// Apply a server event and return the text to print.
    pub fn render(&mut self, message: ServerMessage) -> String {
        match message {
            ServerMessage::PresenceJoined(notice) => {
                MessageFormatter::format_system_notice(&notice.message, &notice.timestamp)
            }
            ServerMessage::PresenceLeft(notice) => {
                let was_typing = !self.typing_users.is_empty();
                self.typing_users.retain(|name| *name != notice.username);
                let mut output =
                    MessageFormatter::format_system_notice(&notice.message, &notice.timestamp);
                if was_typing && self.typing_users.is_empty() {
                    output.push_str(&MessageFormatter::format_typing_cleared());
                }
                output
            }
            ServerMessage::UserCount { count } => {
                self.online = count;
                MessageFormatter::format_user_count(count)
            }
            ServerMessage::ChatMessage(chat) => {
                let is_own = chat.username == self.own_name;
                MessageFormatter::format_chat_message(
                    &chat.username,
                    &chat.message,
                    &chat.timestamp,
                    is_own,
                )
            }
            ServerMessage::Typing(typing) => {
                let was_typing = !self.typing_users.is_empty();
                let known = self.typing_users.contains(&typing.username);
                if typing.is_typing && !known {
                    self.typing_users.push(typing.username);
                } else if !typing.is_typing && known {
                    self.typing_users.retain(|name| *name != typing.username);
                }
                match MessageFormatter::format_typing_indicator(&self.typing_users) {
                    Some(indicator) => indicator,
                    None if was_typing => MessageFormatter::format_typing_cleared(),
                    None => String::new(),
                }
            }
            ServerMessage::Rejected { reason } => MessageFormatter::format_rejected(&reason),
        }
    }
}
