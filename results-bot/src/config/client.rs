//! Results API client config, shared by the bot and the `check` command.

use anyhow::Result;
use results_client::{RetryPolicy, DEFAULT_ENDPOINT};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// RESULTS_API_URL
    pub results_api_url: String,
    /// FETCH_MAX_ATTEMPTS; unset keeps the policy preset's budget
    pub max_attempts: Option<u32>,
    /// FETCH_TIMEOUT_SECS; unset keeps the preset's 30 s
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let results_api_url =
            env::var("RESULTS_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let max_attempts = env::var("FETCH_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok());
        let timeout_secs = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());
        Self {
            results_api_url,
            max_attempts,
            timeout_secs,
        }
    }

    /// `base` with the configured attempt budget and timeout applied.
    pub fn policy(&self, base: RetryPolicy) -> RetryPolicy {
        let mut policy = base;
        if let Some(max_attempts) = self.max_attempts {
            policy = policy.with_max_attempts(max_attempts);
        }
        if let Some(secs) = self.timeout_secs {
            policy = policy.with_timeout(Duration::from_secs(secs));
        }
        policy
    }

    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.results_api_url).is_err() {
            anyhow::bail!(
                "RESULTS_API_URL is not a valid URL: {}",
                self.results_api_url
            );
        }
        if self.max_attempts == Some(0) {
            anyhow::bail!("FETCH_MAX_ATTEMPTS must be at least 1");
        }
        if self.timeout_secs == Some(0) {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be at least 1");
        }
        Ok(())
    }
}
