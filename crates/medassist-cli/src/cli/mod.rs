//! CLI command definitions for the `medassist` binary.
//!
//! Uses clap derive macros for argument parsing. Running `medassist` with no
//! subcommand starts the interactive chat.

pub mod ask;
pub mod chat;
pub mod config;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Describe your symptoms and get possible conditions from your n8n workflow.
#[derive(Parser)]
#[command(name = "medassist", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat {
        /// Use this webhook URL for this session only (not saved).
        #[arg(long)]
        url: Option<String>,
    },

    /// Send a single message and print the reply.
    Ask {
        /// The message to send.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Use this webhook URL for this request only (not saved).
        #[arg(long)]
        url: Option<String>,
    },

    /// View or change the webhook configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Show connection status and client settings.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the configured webhook URL.
    Show,

    /// Save the n8n webhook URL (prompts when omitted).
    SetUrl {
        /// Webhook URL, e.g. https://your-n8n-instance.com/webhook/...
        url: Option<String>,
    },
}
