//! HTTP/WebSocket server: routing, binding and graceful shutdown.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectParticipantUseCase, GetPresenceUseCase, JoinChatUseCase,
    RelayTypingUseCase, SendMessageUseCase,
};

use super::{
    handler::{get_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Chat broadcaster server holding the shared [`AppState`]
///
/// # Example
///
/// ```ignore
/// let server = Server::new(connect, join, send, typing, disconnect, presence);
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Wire the use cases into shared state
    ///
    /// # Arguments
    ///
    /// * `connect_client_usecase` - UseCase for accepting a connection
    /// * `join_chat_usecase` - UseCase for joining with a display name
    /// * `send_message_usecase` - UseCase for relaying chat messages
    /// * `relay_typing_usecase` - UseCase for relaying typing signals
    /// * `disconnect_participant_usecase` - UseCase for disconnection
    /// * `get_presence_usecase` - UseCase for reading the current presence
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        join_chat_usecase: Arc<JoinChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        relay_typing_usecase: Arc<RelayTypingUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        get_presence_usecase: Arc<GetPresenceUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                connect_client_usecase,
                join_chat_usecase,
                send_message_usecase,
                relay_typing_usecase,
                disconnect_participant_usecase,
                get_presence_usecase,
            }),
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind `host:port` and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails when the address cannot be bound or the accept loop errors.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server running on http://{}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
