//! Error types for the chat client.

use hiroba_server::domain::ValueObjectError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Display name rejected locally before connecting
    #[error("{0}")]
    InvalidName(ValueObjectError),

    /// Could not establish the WebSocket connection
    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    /// An established connection dropped
    #[error("Connection lost: {0}")]
    ConnectionLost(String),
}
