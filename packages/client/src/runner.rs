//! Client execution logic with reconnection support.

use hiroba_server::domain::DisplayName;

use crate::{
    domain::{ReconnectPolicy, RetryDecision},
    error::ClientError,
    formatter::MessageFormatter,
    session::run_client_session,
    ui::{InputChannels, redisplay_prompt, spawn_input_thread},
    view::ChatView,
};

/// Run the chat client, reconnecting with the default [`ReconnectPolicy`].
///
/// The name is validated before any connection is attempted. After a drop the
/// client rejoins under the same name.
pub async fn run_client(url: String, name: String) -> Result<(), ClientError> {
    let name = DisplayName::new(name).map_err(ClientError::InvalidName)?;
    let input = spawn_input_thread(name.as_str());
    run_with_policy(&url, &name, input, ReconnectPolicy::default()).await
}

/// Run sessions against `url` until input closes or `policy` gives up.
pub async fn run_with_policy(
    url: &str,
    name: &DisplayName,
    mut input: InputChannels,
    policy: ReconnectPolicy,
) -> Result<(), ClientError> {
    let mut view = ChatView::new(name.as_str());
    let mut retries = 0;
    let mut reconnecting = false;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, name);

        let error = match run_client_session(url, name, &mut input, &mut view, reconnecting).await
        {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };
        tracing::warn!("{}", error);

        if matches!(error, ClientError::ConnectionLost(_)) {
            view.reset();
            reconnecting = true;
            print!(
                "{}",
                MessageFormatter::format_local_notice(
                    "Disconnected from server. Trying to reconnect..."
                )
            );
            redisplay_prompt(name.as_str());
        }

        match policy.decide(&error, retries) {
            RetryDecision::Retry { attempt, delay } => {
                retries = attempt;
                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    delay.as_secs(),
                    attempt,
                    policy.max_attempts
                );
                tokio::time::sleep(delay).await;
            }
            RetryDecision::GiveUp => {
                tracing::error!(
                    "Failed to reconnect after {} attempts. Exiting.",
                    policy.max_attempts
                );
                return Err(error);
            }
        }
    }
}
