//! Line editing on a dedicated thread.
//!
//! rustyline is synchronous, so it runs outside the runtime and forwards what
//! the user does over a channel. The hinter hook fires on every redraw, which
//! gives keystroke granularity for typing indicators.

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The line being edited changed and is not empty
    Edit,
    /// A submitted, trimmed, non-empty line
    Line(String),
    /// Ctrl+C, Ctrl+D, or the editor failed
    Quit,
}

pub struct KeystrokeHelper {
    tx: mpsc::UnboundedSender<InputEvent>,
}

impl KeystrokeHelper {
    pub fn new(tx: mpsc::UnboundedSender<InputEvent>) -> Self {
        Self { tx }
    }
}

impl Helper for KeystrokeHelper {}

impl Completer for KeystrokeHelper {
    type Candidate = String;
}

impl Highlighter for KeystrokeHelper {}

impl Hinter for KeystrokeHelper {
    type Hint = String;

    fn hint(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if !line.trim().is_empty() {
            self.tx.send(InputEvent::Edit).ok();
        }
        None
    }
}

impl Validator for KeystrokeHelper {}

/// Start the readline thread. It lives until the user quits or the receiver is dropped.
pub fn spawn_input_thread(prompt: String) -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match Editor::<KeystrokeHelper, DefaultHistory>::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                tx.send(InputEvent::Quit).ok();
                return;
            }
        };
        rl.set_helper(Some(KeystrokeHelper::new(tx.clone())));

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line).ok();
                    if tx.send(InputEvent::Line(line.to_string())).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    tx.send(InputEvent::Quit).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    tx.send(InputEvent::Quit).ok();
                    break;
                }
            }
        }
    });

    rx
}
