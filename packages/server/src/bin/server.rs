//! Hiroba chat server.
//!
//! Relays join, leave, typing and chat events among all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 cargo run --bin hiroba-server
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRepository},
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectParticipantUseCase, EventSequencer, GetPresenceUseCase,
        JoinChatUseCase, RelayTypingUseCase, SendMessageUseCase,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time chat broadcaster over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(
        &[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "hiroba_shared"],
        "debug",
    );

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory presence registry)
    let repository = Arc::new(InMemoryPresenceRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let sequencer = Arc::new(EventSequencer::new());
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        sequencer.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        sequencer.clone(),
    ));
    let relay_typing_usecase = Arc::new(RelayTypingUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
        sequencer.clone(),
    ));
    let get_presence_usecase = Arc::new(GetPresenceUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        join_chat_usecase,
        send_message_usecase,
        relay_typing_usecase,
        disconnect_participant_usecase,
        get_presence_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
