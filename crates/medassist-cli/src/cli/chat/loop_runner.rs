//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: welcome banner, first-run webhook
//! prompt, the input loop, slash commands and the in-flight exchange. While
//! a reply is pending the loop keeps reading input so `/reset` and `/help`
//! still work; new messages are refused by the controller.

use std::time::Instant;

use console::style;
use medassist_core::chat::controller::{
    ControllerState, ConversationController, ExchangeOutcome, IgnoreReason, PendingExchange,
    SubmitOutcome,
};
use medassist_core::config::store::ConfigStore;
use medassist_core::exchange::transport::Exchange;
use medassist_types::config::ClientConfig;
use medassist_types::notification::Notification;
use tracing::info;

use crate::state::{AppState, override_settings};

use super::banner::{print_about, print_empty_hint, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, PromptMode};
use super::renderer::{ChatRenderer, thinking_spinner};
use super::settings::{print_config_saved, print_setup_guide, prompt_until_configured};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

/// Start an interactive session, using `url` for this session only when
/// given and the saved webhook URL otherwise.
pub async fn run_chat(state: &AppState, url: Option<String>) -> anyhow::Result<()> {
    let exchange = state.exchange()?;
    match url {
        Some(url) => {
            let settings = override_settings(&url).await?;
            run_chat_loop(&state.client_config, ConversationController::new(exchange, settings))
                .await
        }
        None => {
            let settings = state.endpoint_settings().await?;
            run_chat_loop(&state.client_config, ConversationController::new(exchange, settings))
                .await
        }
    }
}

/// Run the interactive chat loop until the user exits.
pub async fn run_chat_loop<E: Exchange, S: ConfigStore>(
    config: &ClientConfig,
    mut controller: ConversationController<E, S>,
) -> anyhow::Result<()> {
    let renderer = ChatRenderer::new(config.assistant_name.as_str());

    print_welcome_banner(
        &config.assistant_name,
        controller.endpoint(),
        controller.session_id().as_str(),
        config.show_disclaimer,
    );

    if !controller.is_configured() && !prompt_until_configured(&mut controller, &renderer).await? {
        println!(
            "  {}",
            style("No webhook configured. Use /settings when you're ready.").dim()
        );
    }
    print_empty_hint();

    let (mut chat_input, _writer) = ChatInput::new(PromptMode::for_state(controller.state()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    info!(session_id = %controller.session_id(), "Chat session started");

    loop {
        chat_input.set_mode(PromptMode::for_state(controller.state()));

        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "  {}",
                    style("Press Ctrl+D or type /exit to leave.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            if handle_command(cmd, &mut controller, &renderer) == LoopControl::Exit {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            continue;
        }

        if controller.state() == ControllerState::AwaitingConfig {
            match controller.configure(&text).await {
                Ok(()) => print_config_saved(),
                Err(err) => renderer.print_notification(&Notification::for_config_error(&err)),
            }
            continue;
        }

        match controller.begin_submit(&text) {
            SubmitOutcome::Ignored(_) => {}
            SubmitOutcome::NeedsConfig(notification) => {
                renderer.print_notification(&notification);
                print_setup_guide();
            }
            SubmitOutcome::Dispatched(pending) => {
                let control =
                    drive_exchange(&mut controller, pending, &mut chat_input, &renderer).await;
                if control == LoopControl::Exit {
                    println!("\n  {}", style("Session ended.").dim());
                    break;
                }
            }
        }
    }

    chat_input.finish();
    info!(
        session_id = %controller.session_id(),
        turns = controller.conversation().len(),
        "Chat session ended"
    );
    Ok(())
}

fn handle_command<E: Exchange, S: ConfigStore>(
    cmd: ChatCommand,
    controller: &mut ConversationController<E, S>,
    renderer: &ChatRenderer,
) -> LoopControl {
    match cmd {
        ChatCommand::Exit => return LoopControl::Exit,
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Reset => print_reset(controller.reset()),
        ChatCommand::Settings => {
            controller.open_settings();
            print_setup_guide();
            if let Some(url) = controller.endpoint() {
                println!("  {} {}", style("Current:").bold(), style(url).dim());
            }
            println!(
                "  {}\n",
                style("Enter the webhook URL, or /cancel to keep the current one.").dim()
            );
        }
        ChatCommand::Cancel => {
            if controller.state() == ControllerState::AwaitingConfig {
                controller.close_settings();
                println!("  {}\n", style("Settings closed.").dim());
            } else {
                println!("  {}\n", style("Nothing to cancel.").dim());
            }
        }
        ChatCommand::History => {
            let turns = controller.conversation().turns();
            if turns.is_empty() {
                print_empty_hint();
            } else {
                renderer.print_turns(turns);
            }
        }
        ChatCommand::About => print_about(renderer),
        ChatCommand::Unknown(cmd) => commands::print_unknown(&cmd),
    }
    LoopControl::Continue
}

fn print_reset(removed: usize) {
    if removed == 0 {
        println!("  {}\n", style("Nothing to clear.").dim());
    } else {
        println!(
            "\n  {} {}",
            style("✓").green().bold(),
            style("Chat cleared").bold()
        );
        println!("  Your conversation has been reset.\n");
    }
}

/// Wait for `pending` to settle while still serving input, then apply the
/// result to the controller and render it.
async fn drive_exchange<E: Exchange, S: ConfigStore>(
    controller: &mut ConversationController<E, S>,
    pending: PendingExchange,
    input: &mut ChatInput,
    renderer: &ChatRenderer,
) -> LoopControl {
    input.set_mode(PromptMode::Waiting);
    let spinner = thinking_spinner();
    let started = Instant::now();

    let exchange = controller.exchange();
    let request = pending.request().clone();
    let reply = exchange.send(&request);
    tokio::pin!(reply);

    let mut exit_requested = false;
    let result = loop {
        tokio::select! {
            result = &mut reply => break result,
            event = input.read_line() => match event {
                InputEvent::Eof => {
                    exit_requested = true;
                    spinner.suspend(|| {
                        println!("  {}", style("Waiting for the reply before exiting...").dim());
                    });
                }
                InputEvent::Interrupted => {}
                InputEvent::Message(text) => match commands::parse(&text) {
                    Some(ChatCommand::Reset) => {
                        let removed = controller.reset();
                        spinner.suspend(|| print_reset(removed));
                    }
                    Some(ChatCommand::Help) => spinner.suspend(commands::print_help),
                    Some(ChatCommand::Exit) => {
                        exit_requested = true;
                        spinner.suspend(|| {
                            println!("  {}", style("Waiting for the reply before exiting...").dim());
                        });
                    }
                    Some(_) => spinner.suspend(|| {
                        println!("  {}", style("Available once the reply arrives.").dim());
                    }),
                    None => {
                        if let SubmitOutcome::Ignored(IgnoreReason::Busy) =
                            controller.begin_submit(&text)
                        {
                            spinner.suspend(|| {
                                println!(
                                    "  {}",
                                    style("Still analyzing your previous message. Please wait for the reply.")
                                        .dim()
                                );
                            });
                        }
                    }
                },
            },
        }
    };
    spinner.finish_and_clear();

    match controller.complete(pending, result) {
        ExchangeOutcome::Replied(turn) | ExchangeOutcome::Fallback(turn) => {
            renderer.print_turn(&turn);
            renderer.print_reply_footer(started.elapsed());
        }
        ExchangeOutcome::Failed(notification) => {
            renderer.print_notification(&notification);
            println!(
                "  {}\n",
                style("Your message was not kept. Send it again when you're ready.").dim()
            );
        }
        ExchangeOutcome::Discarded => {
            println!(
                "  {}\n",
                style("Reply discarded because the chat was cleared.").dim()
            );
        }
    }

    if exit_requested {
        LoopControl::Exit
    } else {
        LoopControl::Continue
    }
}
