//! `medassist status`: connection state and client settings.

use anyhow::Result;
use console::style;
use medassist_infra::filesystem::config_path;

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let settings = state.endpoint_settings().await?;
    let config = &state.client_config;
    let timeout_secs = config.request_timeout().as_secs_f64();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "connected": settings.is_configured(),
            "webhook_url": settings.get(),
            "request_timeout_ms": config.request_timeout_ms,
            "assistant_name": config.assistant_name,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} v{}",
        style("+").cyan().bold(),
        style(format!("{} AI", config.assistant_name)).bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Webhook ──").dim());
    match settings.get() {
        Some(url) => {
            println!("  Status:   {}", style("Connected").green());
            println!("  URL:      {}", style(url).dim());
        }
        None => {
            println!("  Status:   {}", style("Not configured").yellow());
            println!(
                "  {}",
                style("Set it with: medassist config set-url <URL>").dim()
            );
        }
    }
    println!("  Timeout:  {timeout_secs:.0}s");
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Settings: {}", style(state.settings_store().path().display()).dim());
    println!("  Config:   {}", style(config_path(&state.data_dir).display()).dim());
    println!();

    Ok(())
}
