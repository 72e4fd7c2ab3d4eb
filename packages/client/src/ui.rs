//! UI utilities for the client.

use std::io::Write;

use rustyline::error::ReadlineError;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Context, Editor, Helper, Highlighter, Validator};
use tokio::sync::mpsc;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(name: &str) {
    print!("{}> ", name);
    std::io::stdout().flush().ok();
}

/// Line-editor helper that reports every edit of a non-empty input line.
///
/// rustyline asks the hinter for a hint after each change to the line, which
/// makes it a convenient keystroke hook. No hint is ever shown.
#[derive(Completer, Helper, Highlighter, Validator)]
pub struct KeystrokeHelper {
    keystrokes: mpsc::UnboundedSender<()>,
}

impl Hinter for KeystrokeHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if !line.is_empty() {
            self.keystrokes.send(()).ok();
        }
        None
    }
}

/// Channels fed by the readline thread
pub struct InputChannels {
    /// Submitted lines (trimmed, non-empty)
    pub lines: mpsc::UnboundedReceiver<String>,
    /// One unit per edit of the input line
    pub keystrokes: mpsc::UnboundedReceiver<()>,
}

/// Spawn the blocking readline thread.
///
/// The thread outlives reconnects; both channels close when the user
/// presses Ctrl+C or Ctrl+D.
pub fn spawn_input_thread(name: &str) -> InputChannels {
    let (line_tx, lines) = mpsc::unbounded_channel::<String>();
    let (keystroke_tx, keystrokes) = mpsc::unbounded_channel::<()>();
    let prompt = format!("{}> ", name);

    std::thread::spawn(move || {
        let mut rl: Editor<KeystrokeHelper, DefaultHistory> = match Editor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };
        rl.set_helper(Some(KeystrokeHelper {
            keystrokes: keystroke_tx,
        }));

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if line_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    InputChannels { lines, keystrokes }
}
