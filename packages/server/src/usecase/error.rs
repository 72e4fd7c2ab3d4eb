//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{MessagePushError, ValueObjectError};

/// join 処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Invalid display name: {0}")]
    InvalidName(ValueObjectError),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// メッセージ送信処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// join していない接続からの送信（黙って破棄される）
    #[error("Sender has not joined the chat")]
    NotJoined,

    #[error("Invalid message: {0}")]
    InvalidMessage(ValueObjectError),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// タイピング通知処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingError {
    /// join していない接続からの通知（黙って破棄される）
    #[error("Sender has not joined the chat")]
    NotJoined,

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// 切断処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("Broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}
