//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the session: help, reset, the
//! webhook settings prompt, history and the about page.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation.
    Reset,
    /// Open the webhook settings prompt.
    Settings,
    /// Close the settings prompt without saving.
    Cancel,
    /// Re-render the conversation so far.
    History,
    /// Show what MedAssist is and what it is not.
    About,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` unless the input starts with `/` immediately followed by
/// a command word, so text like "/ sharp pain in my side" is sent as a
/// message. Anything after the command word is ignored.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let word = trimmed.strip_prefix('/')?;
    if word.is_empty() || word.starts_with(char::is_whitespace) {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/reset" | "/clear" | "/new" => ChatCommand::Reset,
        "/settings" | "/config" => ChatCommand::Settings,
        "/cancel" => ChatCommand::Cancel,
        "/history" => ChatCommand::History,
        "/about" => ChatCommand::About,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    let commands = [
        ("/help", "Show this help message"),
        ("/reset", "Clear the conversation (also /clear, /new)"),
        ("/settings", "Configure the n8n webhook URL"),
        ("/cancel", "Close the settings prompt without saving"),
        ("/history", "Show the conversation so far"),
        ("/about", "About MedAssist AI"),
        ("/exit", "End the chat session"),
    ];

    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, description) in commands {
        println!("  {:<11} {}", style(name).cyan(), description);
    }
    println!();
    println!(
        "  {}",
        style("Anything else is sent to the assistant. Ctrl+D exits.").dim()
    );
    println!();
}

/// Print an error for an unrecognised command.
pub fn print_unknown(cmd: &str) {
    println!(
        "\n  {} Unknown command: {}. Type {} for available commands.\n",
        style("?").yellow().bold(),
        style(cmd).yellow(),
        style("/help").cyan()
    );
}
