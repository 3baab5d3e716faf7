//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline` so the loop can await a line while an
//! exchange is in flight. The prompt follows the controller state.

use console::style;
use medassist_core::chat::controller::ControllerState;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (trimmed).
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// What the prompt is currently asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// A symptom description.
    Message,
    /// A webhook URL for the settings prompt.
    WebhookUrl,
    /// Nothing; a reply is pending.
    Waiting,
}

impl PromptMode {
    pub fn for_state(state: ControllerState) -> Self {
        match state {
            ControllerState::Idle => Self::Message,
            ControllerState::AwaitingConfig => Self::WebhookUrl,
            ControllerState::Sending => Self::Waiting,
        }
    }

    fn prompt(self) -> String {
        match self {
            Self::Message => format!("  {} ", style("You >").green().bold()),
            Self::WebhookUrl => format!("  {} ", style("Webhook URL >").yellow().bold()),
            Self::Waiting => format!("  {} ", style("...").dim()),
        }
    }
}

pub struct ChatInput {
    rl: Readline,
    mode: PromptMode,
}

impl ChatInput {
    /// Create the input handler in `mode`.
    ///
    /// The returned `SharedWriter` must be kept alive for the duration of
    /// the session.
    pub fn new(mode: PromptMode) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(mode.prompt())?;
        Ok((Self { rl, mode }, stdout))
    }

    /// Switch the prompt. No-op when already in `mode`.
    pub fn set_mode(&mut self, mode: PromptMode) {
        if self.mode != mode {
            self.mode = mode;
            let _ = self.rl.update_prompt(&mode.prompt());
        }
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Message(line.trim().to_string()),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(err) => {
                tracing::warn!(error = %err, "Readline failed, ending input");
                InputEvent::Eof
            }
        }
    }

    /// Restore the terminal before exit.
    pub fn finish(mut self) {
        let _ = self.rl.flush();
    }
}
