//! BotConfig: Telegram + log + health + assets, with the results client config nested.

use anyhow::Result;
use results_client::RetryPolicy;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use super::ClientConfig;

/// Full bot config. Use `BotConfig::load()` for env-based loading, then `validate()`.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN, falling back to TELEGRAM_BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// ASSETS_DIR: where the pass/fail animations live
    pub assets_dir: PathBuf,
    /// PORT: health check server port
    pub health_port: u16,
    pub client: ClientConfig,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/results-bot.log".to_string());
        let assets_dir = env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));
        let health_port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            assets_dir,
            health_port,
            client: ClientConfig::from_env(),
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        self.client.validate()
    }

    /// Interactive retry policy with env overrides applied.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.client.policy(RetryPolicy::interactive())
    }

    /// Health server bind address (all interfaces).
    pub fn health_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.health_port))
    }
}
