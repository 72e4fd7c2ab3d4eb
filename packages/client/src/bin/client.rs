//! Terminal chat client.
//!
//! Joins the chat under a display name and sends each entered line as a
//! message. Shows join/leave notices, the online count and who is typing.
//! Reconnects automatically (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --name Alice
//! cargo run --bin hiroba-client -- -n Bob --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use hiroba_client::{error::ClientError, run_client};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the Hiroba chat", long_about = None)]
struct Args {
    /// Display name shown to other participants (1-20 characters)
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "HIROBA_URL", default_value = "ws://127.0.0.1:3000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(&[env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME")], "info");

    let args = Args::parse();

    match run_client(args.url, args.name).await {
        Ok(()) => {}
        Err(ClientError::InvalidName(e)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
