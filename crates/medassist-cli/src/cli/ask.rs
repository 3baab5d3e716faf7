//! One-shot `medassist ask`: send a single message and print the reply.

use std::time::Instant;

use anyhow::bail;
use medassist_core::chat::controller::{
    ConversationController, ExchangeOutcome, IgnoreReason, SubmitResult,
};
use medassist_core::config::store::ConfigStore;
use medassist_core::exchange::transport::Exchange;
use medassist_types::chat::ChatTurn;

use crate::state::{AppState, override_settings};

use super::chat::renderer::{ChatRenderer, thinking_spinner};

pub async fn ask(state: &AppState, text: &str, url: Option<String>, json: bool) -> anyhow::Result<()> {
    let exchange = state.exchange()?;
    match url {
        Some(url) => {
            let settings = override_settings(&url).await?;
            ask_with(state, ConversationController::new(exchange, settings), text, json).await
        }
        None => {
            let settings = state.endpoint_settings().await?;
            ask_with(state, ConversationController::new(exchange, settings), text, json).await
        }
    }
}

async fn ask_with<E: Exchange, S: ConfigStore>(
    state: &AppState,
    mut controller: ConversationController<E, S>,
    text: &str,
    json: bool,
) -> anyhow::Result<()> {
    let spinner = (!json).then(thinking_spinner);
    let started = Instant::now();
    let result = controller.submit(text).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let (turn, fallback) = match result {
        SubmitResult::Ignored(IgnoreReason::Blank) => bail!("Nothing to send: the message is empty"),
        SubmitResult::Ignored(IgnoreReason::Busy) => bail!("Another message is still being sent"),
        SubmitResult::NeedsConfig(notification) => bail!(
            "{}. Set it with: medassist config set-url <URL>",
            notification.message.trim_end_matches('.')
        ),
        SubmitResult::Completed(outcome) => match outcome {
            ExchangeOutcome::Replied(turn) => (turn, false),
            ExchangeOutcome::Fallback(turn) => (turn, true),
            ExchangeOutcome::Failed(notification) => {
                bail!("{}: {}", notification.title, notification.message)
            }
            ExchangeOutcome::Discarded => bail!("The reply was discarded"),
        },
    };

    if json {
        print_json(&controller, &turn, fallback)?;
    } else {
        let renderer = ChatRenderer::new(state.client_config.assistant_name.as_str());
        renderer.print_turn(&turn);
        renderer.print_reply_footer(started.elapsed());
    }
    Ok(())
}

fn print_json<E: Exchange, S: ConfigStore>(
    controller: &ConversationController<E, S>,
    turn: &ChatTurn,
    fallback: bool,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "session_id": controller.session_id(),
        "reply": turn.content,
        "fallback": fallback,
        "created_at": turn.created_at,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
