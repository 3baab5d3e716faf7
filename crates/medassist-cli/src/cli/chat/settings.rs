//! Webhook settings prompt: setup guide and the blocking first-run prompt.

use console::style;
use dialoguer::Input;
use medassist_core::chat::controller::ConversationController;
use medassist_core::config::store::ConfigStore;
use medassist_core::exchange::transport::Exchange;
use medassist_types::notification::Notification;

use super::renderer::ChatRenderer;

const SETUP_STEPS: [&str; 7] = [
    "Open your n8n workflow",
    "Remove any \"Chat Trigger\" node",
    "Add a \"Webhook\" node as the trigger",
    "Set HTTP Method to POST",
    "Copy the webhook URL (Production or Test URL)",
    "Activate your workflow",
    "Paste the URL below",
];

/// Print how to expose an n8n workflow as a webhook.
pub fn print_setup_guide() {
    println!();
    println!("  {}", style("Configure n8n Webhook").bold());
    println!();
    for (i, step) in SETUP_STEPS.iter().enumerate() {
        println!("  {} {step}", style(format!("{}.", i + 1)).cyan());
    }
    println!();
    println!(
        "  {}",
        style("Your workflow should return JSON with a \"response\" field, e.g. {\"response\": \"...\"}")
            .dim()
    );
    println!();
}

pub fn print_config_saved() {
    println!(
        "\n  {} {}",
        style("✓").green().bold(),
        style("Webhook Configured").bold()
    );
    println!("  Your n8n webhook URL has been saved successfully.\n");
}

/// Ask for the webhook URL with `dialoguer` until a valid one is saved.
///
/// Used before the readline prompt exists. Returns `Ok(false)` if the user
/// aborts the prompt (Ctrl+C / closed stdin).
pub async fn prompt_until_configured<E: Exchange, S: ConfigStore>(
    controller: &mut ConversationController<E, S>,
    renderer: &ChatRenderer,
) -> anyhow::Result<bool> {
    controller.open_settings();
    print_setup_guide();

    loop {
        let entered = Input::<String>::new()
            .with_prompt("  n8n Webhook URL")
            .allow_empty(true)
            .interact_text();

        let url = match entered {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(error = %err, "Settings prompt aborted");
                controller.close_settings();
                return Ok(false);
            }
        };

        match controller.configure(&url).await {
            Ok(()) => {
                print_config_saved();
                return Ok(true);
            }
            Err(err) => renderer.print_notification(&Notification::for_config_error(&err)),
        }
    }
}
