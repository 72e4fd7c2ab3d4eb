//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{Stream, StreamExt},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
    usecase::{JoinError, SendMessageError, TypingError},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Create a channel for this connection to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Register before the upgrade completes so that broadcasts issued right
    // after the handshake already include this connection.
    let connection_id = state.connect_client_usecase.execute(tx).await;
    tracing::info!("A user connected: {}", connection_id);

    let failed_state = state.clone();
    let failed_id = connection_id.clone();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!("WebSocket upgrade failed for '{}': {}", failed_id, e);
        tokio::spawn(async move {
            if let Err(e) = failed_state
                .disconnect_participant_usecase
                .execute(&failed_id)
                .await
            {
                tracing::warn!("Failed to clean up '{}': {}", failed_id, e);
            }
        });
    })
    .on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx))
}

/// Spawns a task that receives events from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver for serialized events addressed to this connection
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Route one inbound text frame to its use case.
///
/// Malformed frames and events from connections that have not joined are
/// dropped here; nothing a single client sends can fail the connection loop.
async fn dispatch(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                "Failed to parse message from '{}' as JSON: {}",
                connection_id,
                e
            );
            return;
        }
    };

    match message {
        ClientMessage::Join { username } => {
            match state
                .join_chat_usecase
                .execute(connection_id, username)
                .await
            {
                Ok(count) => tracing::debug!("Users online: {}", count),
                Err(JoinError::InvalidName(e)) => {
                    tracing::warn!("Rejected join from '{}': {}", connection_id, e);
                }
                Err(e) => tracing::warn!("Failed to handle join: {}", e),
            }
        }
        ClientMessage::ChatMessage { message } => {
            match state
                .send_message_usecase
                .execute(connection_id, message)
                .await
            {
                Ok(_) => {}
                Err(SendMessageError::NotJoined) => {
                    tracing::debug!("Dropped message from unjoined '{}'", connection_id);
                }
                Err(e) => tracing::warn!("Failed to send message: {}", e),
            }
        }
        ClientMessage::Typing { is_typing } => {
            match state
                .relay_typing_usecase
                .execute(connection_id, is_typing)
                .await
            {
                Ok(()) => {}
                Err(TypingError::NotJoined) => {
                    tracing::debug!("Dropped typing from unjoined '{}'", connection_id);
                }
                Err(e) => tracing::warn!("Failed to relay typing: {}", e),
            }
        }
    }
}

/// Read frames and dispatch them until the socket ends or `stop` fires.
///
/// `stop` is only observed between frames, so an event that is already being
/// dispatched always runs to completion.
async fn receive_loop<S>(
    mut receiver: S,
    mut stop: oneshot::Receiver<()>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut stop => break,
        };
        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received text: {}", text.as_str());
                dispatch(&state, &connection_id, text.as_str()).await;
            }
            Message::Binary(data) => {
                tracing::debug!("Ignoring binary frame ({} bytes)", data.len());
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, receiver) = socket.split();
    let (stop_tx, stop_rx) = oneshot::channel();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        stop_rx,
        state.clone(),
        connection_id.clone(),
    ));

    // Spawn a task to forward events addressed to this connection
    let mut send_task = pusher_loop(rx, sender);

    // When the socket can no longer be written, let the receiver finish the
    // event in flight before disconnecting
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            stop_tx.send(()).ok();
            if let Err(e) = (&mut recv_task).await {
                tracing::warn!("Receive task for '{}' failed: {}", connection_id, e);
            }
        }
    };

    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Ok(Some(name)) => tracing::info!("{} disconnected: {}", name, connection_id),
        Ok(None) => tracing::info!("User disconnected: {}", connection_id),
        Err(e) => tracing::warn!("Failed to handle disconnect of '{}': {}", connection_id, e),
    }
}
