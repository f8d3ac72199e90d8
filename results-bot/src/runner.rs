use std::sync::Arc;

use anyhow::{Context, Result};
use results_client::ResultFetcher;
use results_core::{init_tracing, TelegramBot};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};

use crate::config::BotConfig;
use crate::conversation::Command;
use crate::health;
use crate::media::MediaSelector;
use crate::session::ResultsSession;
use crate::telegram::run_dispatcher;

/// Builds the teloxide bot, pointing it at a custom Bot API server when configured.
pub fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {url}"))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Main entry: validate config, init logging, wire the session, then poll until Ctrl-C.
/// The health server (unless disabled) runs alongside and is stopped with the dispatcher.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, serve_health: bool) -> Result<()> {
    config.validate()?;
    init_tracing(Some(config.log_file.as_str()))?;

    let policy = config.retry_policy();
    info!(
        started_at = %chrono::Local::now().to_rfc3339(),
        results_api_url = %config.client.results_api_url,
        max_attempts = policy.max_attempts,
        timeout_secs = policy.timeout_per_attempt.as_secs(),
        assets_dir = %config.assets_dir.display(),
        "Initializing bot"
    );
    if !config.assets_dir.is_dir() {
        warn!(
            assets_dir = %config.assets_dir.display(),
            "Assets directory not found; verdicts will be sent as text"
        );
    }

    let bot = build_teloxide_bot(&config)?;
    let fetcher = ResultFetcher::new(policy)
        .context("Failed to build results HTTP client")?
        .with_endpoint(config.client.results_api_url.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let session = Arc::new(ResultsSession::new(
        Arc::new(TelegramBot::from_bot(bot.clone())),
        Arc::new(fetcher),
        MediaSelector::new(config.assets_dir.clone()),
    ));

    let health_task = serve_health.then(|| {
        let addr = config.health_addr();
        tokio::spawn(async move {
            if let Err(e) = health::serve(addr).await {
                error!(error = %e, "Health server failed");
            }
        })
    });

    info!("Bot started successfully");
    run_dispatcher(bot, session).await;

    if let Some(task) = health_task {
        task.abort();
    }
    info!("Bot stopped");
    Ok(())
}
