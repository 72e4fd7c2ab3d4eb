//! Domain error types.

use thiserror::Error;

/// Value Object の生成時エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("ConnectionId must not be empty")]
    ConnectionIdEmpty,

    #[error("Please enter your name")]
    DisplayNameEmpty,

    #[error("Name must be {max} characters or less (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    #[error("Message must not be empty")]
    MessageTextEmpty,

    #[error("Message must be {max} characters or less (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// MessagePusher のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to serialize event: {0}")]
    Serialization(String),
}
