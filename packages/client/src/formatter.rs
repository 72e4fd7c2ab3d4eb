//! Message formatting utilities for client display.

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `username` - Display name of the sender
    /// * `message` - The message text
    /// * `timestamp` - Server-formatted clock time
    /// * `is_own` - Whether the message was sent by this client
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(
        username: &str,
        message: &str,
        timestamp: &str,
        is_own: bool,
    ) -> String {
        let me_suffix = if is_own { " (me)" } else { "" };
        format!("\n[{}] {}{}: {}\n", timestamp, username, me_suffix, message)
    }

    /// Format a system notice such as "Alice joined the chat"
    pub fn format_system_notice(message: &str, timestamp: &str) -> String {
        format!("\n* {} • {}\n", message, timestamp)
    }

    /// Format the typing indicator line
    ///
    /// # Arguments
    ///
    /// * `users` - Names of users currently typing, in the order they started
    ///
    /// # Returns
    ///
    /// `None` when nobody is typing
    pub fn format_typing_indicator(users: &[String]) -> Option<String> {
        let text = match users {
            [] => return None,
            [one] => format!("{} is typing...", one),
            [first, second] => format!("{} and {} are typing...", first, second),
            many => format!("{} people are typing...", many.len()),
        };
        Some(format!("\n  {}\n", text))
    }

    /// Format the line shown when the last typist stops
    pub fn format_typing_cleared() -> String {
        "\n  (no one is typing)\n".to_string()
    }

    /// Format the online user count
    pub fn format_user_count(count: usize) -> String {
        let noun = if count == 1 { "user" } else { "users" };
        format!("\n({} {} online)\n", count, noun)
    }

    /// Format a rejection sent back by the server
    pub fn format_rejected(reason: &str) -> String {
        format!("\n! {}\n", reason)
    }

    /// Format a notice produced by the client itself (connection state, local validation)
    pub fn format_local_notice(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
