//! `medassist config`: view and persist the n8n webhook URL.

use anyhow::{Result, bail};
use console::style;
use dialoguer::Input;
use medassist_types::error::ConfigError;

use crate::state::AppState;

use super::chat::settings::{print_config_saved, print_setup_guide};

pub async fn show(state: &AppState, json: bool) -> Result<()> {
    let settings = state.endpoint_settings().await?;
    let store = state.settings_store();

    if json {
        let output = serde_json::json!({
            "webhook_url": settings.get(),
            "settings_file": store.path().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match settings.get() {
        Some(url) => println!("{url}"),
        None => {
            println!("{}", style("not configured").yellow());
            eprintln!(
                "  {}",
                style("Set it with: medassist config set-url <URL>").dim()
            );
        }
    }
    Ok(())
}

/// Validate and persist the webhook URL, prompting for it when omitted.
pub async fn set_url(state: &AppState, url: Option<String>, json: bool) -> Result<()> {
    let mut settings = state.endpoint_settings().await?;

    let url = match url {
        Some(url) => url,
        None => {
            print_setup_guide();
            Input::<String>::new()
                .with_prompt("  n8n Webhook URL")
                .with_initial_text(settings.get().unwrap_or_default())
                .allow_empty(true)
                .interact_text()?
        }
    };

    match settings.set(&url).await {
        Ok(()) => {}
        Err(ConfigError::EmptyUrl) => bail!("Please enter a valid webhook URL"),
        Err(err) => return Err(err.into()),
    }

    if json {
        let output = serde_json::json!({
            "webhook_url": settings.get(),
            "saved": true,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_config_saved();
    }
    Ok(())
}
