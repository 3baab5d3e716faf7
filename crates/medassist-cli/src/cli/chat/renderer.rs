//! Terminal rendering of chat turns and notifications.
//!
//! Assistant replies are Markdown (condition lists, bold headings) and are
//! rendered through `termimad`; user turns are printed as typed.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use medassist_types::chat::{ChatTurn, TurnRole};
use medassist_types::notification::Notification;
use termimad::crossterm::style::Color;
use termimad::{FmtText, MadSkin, StyledChar};

/// Narrowest width replies are wrapped to.
const MIN_RENDER_WIDTH: usize = 20;

pub struct ChatRenderer {
    skin: MadSkin,
    assistant_name: String,
}

impl ChatRenderer {
    pub fn new(assistant_name: impl Into<String>) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        skin.bullet = StyledChar::from_fg_char(Color::Cyan, '•');

        Self {
            skin,
            assistant_name: assistant_name.into(),
        }
    }

    /// Render Markdown wrapped to `width` columns, each line indented by two
    /// spaces.
    pub fn render_markdown(&self, markdown: &str, width: usize) -> String {
        let width = width.saturating_sub(2).max(MIN_RENDER_WIDTH);
        let text = FmtText::from(&self.skin, markdown, Some(width));
        text.to_string()
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn print_markdown(&self, markdown: &str) {
        println!();
        println!("{}", self.render_markdown(markdown, terminal_width()));
        println!();
    }

    pub fn print_turn(&self, turn: &ChatTurn) {
        match turn.role {
            TurnRole::User => {
                println!("\n  {} {}", style("You >").green().bold(), turn.content);
            }
            TurnRole::Assistant => {
                println!("\n  {}", style(&self.assistant_name).cyan().bold());
                println!("{}", self.render_markdown(&turn.content, terminal_width()));
            }
        }
    }

    pub fn print_turns(&self, turns: &[ChatTurn]) {
        for turn in turns {
            self.print_turn(turn);
        }
        println!();
    }

    /// Print the elapsed-time footer after a reply.
    pub fn print_reply_footer(&self, elapsed: Duration) {
        println!(
            "\n  {} {:.1}s\n",
            style("|").dim(),
            style(elapsed.as_secs_f64()).dim()
        );
    }

    pub fn print_notification(&self, notification: &Notification) {
        eprintln!(
            "\n  {} {}",
            style("!").red().bold(),
            style(&notification.title).red().bold()
        );
        eprintln!("  {}\n", notification.message);
    }
}

fn terminal_width() -> usize {
    termimad::terminal_size().0 as usize
}

/// Spinner shown while waiting for the webhook.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Analyzing your symptoms...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
