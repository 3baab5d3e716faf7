//! MedAssist terminal client entry point.
//!
//! Binary name: `medassist`
//!
//! Parses CLI arguments, sets up tracing, loads settings from the data
//! directory, then dispatches to the command handler. With no subcommand
//! the interactive chat starts.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands, ConfigCommand};
use medassist_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,medassist=debug",
        _ => "trace",
    };
    init_tracing(filter, cli.otel).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "medassist", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;

    match cli.command.unwrap_or(Commands::Chat { url: None }) {
        Commands::Chat { url } => cli::chat::loop_runner::run_chat(&state, url).await,
        Commands::Ask { text, url } => cli::ask::ask(&state, &text.join(" "), url, cli.json).await,
        Commands::Config { action } => match action {
            ConfigCommand::Show => cli::config::show(&state, cli.json).await,
            ConfigCommand::SetUrl { url } => cli::config::set_url(&state, url, cli.json).await,
        },
        Commands::Status => cli::status::status(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
