//! Typing indicator debounce.
//!
//! The first edit of the input line starts typing; every further edit pushes
//! the deadline back. When the line stays untouched for the quiet interval,
//! or a message is submitted, typing stops.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Quiet interval after which typing is considered stopped
pub const TYPING_QUIET_INTERVAL: Duration = Duration::from_secs(1);

/// Cancellable "stopped typing" timer, reset on every keystroke.
///
/// Transition methods return `Some(is_typing)` when a typing signal should be
/// sent, `None` when the state did not change.
#[derive(Debug)]
pub struct TypingDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl TypingDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.deadline.is_some()
    }

    /// The input line changed.
    pub fn keystroke(&mut self) -> Option<bool> {
        let started = self.deadline.is_none();
        self.deadline = Some(Instant::now() + self.quiet);
        started.then_some(true)
    }

    /// A message was sent.
    pub fn submitted(&mut self) -> Option<bool> {
        self.stop()
    }

    /// The quiet interval elapsed (call after [`expired`](Self::expired) resolves).
    pub fn stop(&mut self) -> Option<bool> {
        self.deadline.take().map(|_| false)
    }

    /// Resolve at the current deadline; never resolves while not typing.
    ///
    /// Cancel-safe: dropping the future leaves the state untouched.
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for TypingDebouncer {
    fn default() -> Self {
        Self::new(TYPING_QUIET_INTERVAL)
    }
}
