//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectParticipantUseCase, GetPresenceUseCase, JoinChatUseCase,
    RelayTypingUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続受付のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// JoinChatUseCase（join のユースケース）
    pub join_chat_usecase: Arc<JoinChatUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// RelayTypingUseCase（タイピング通知のユースケース）
    pub relay_typing_usecase: Arc<RelayTypingUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// GetPresenceUseCase（オンライン状況取得のユースケース）
    pub get_presence_usecase: Arc<GetPresenceUseCase>,
}
