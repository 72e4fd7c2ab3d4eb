//! Reconnection decisions, kept free of I/O so they can be tested directly.

use std::time::Duration;

use crate::error::ClientError;

/// How often and how long the client retries after a failed or lost connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(5),
        }
    }
}

/// What the runner does after a session ends with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait `delay`, then make attempt number `attempt` (1-based)
    Retry { attempt: u32, delay: Duration },
    /// Give up and report the error
    GiveUp,
}

impl ReconnectPolicy {
    /// Decide the next step given how many retries have already been made.
    ///
    /// A lost connection had been established, so the retry budget starts
    /// over. A name the server would never accept is not retried.
    pub fn decide(&self, error: &ClientError, retries_so_far: u32) -> RetryDecision {
        let used = match error {
            ClientError::InvalidName(_) => return RetryDecision::GiveUp,
            ClientError::ConnectionLost(_) => 0,
            ClientError::ConnectFailed(_) => retries_so_far,
        };

        if used >= self.max_attempts {
            return RetryDecision::GiveUp;
        }

        RetryDecision::Retry {
            attempt: used + 1,
            delay: self.interval,
        }
    }
}
