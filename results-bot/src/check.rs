//! `check` subcommand: one lookup from the terminal.

use std::time::Duration;

use anyhow::{Context, Result};
use results_client::{FetchOutcome, ResultFetcher, ResultQuery, RetryPolicy, Transport};
use results_core::init_cli_tracing;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::format::plain_report;

/// Batch preset with the configured timeout and an optional attempt override.
pub fn check_policy(client: &ClientConfig, attempts: Option<u32>) -> RetryPolicy {
    let mut policy = RetryPolicy::batch();
    if let Some(secs) = client.timeout_secs {
        policy = policy.with_timeout(Duration::from_secs(secs));
    }
    if let Some(attempts) = attempts {
        policy = policy.with_max_attempts(attempts);
    }
    policy
}

/// Runs the lookup and returns the printable report. Exhausted retries are an error carrying
/// the report text.
#[instrument(level = "debug", skip(fetcher, query), fields(admission_no = %query.identifier()))]
pub async fn check<T: Transport>(fetcher: &ResultFetcher<T>, query: &ResultQuery) -> Result<String> {
    let outcome = fetcher.fetch(query).await.resolve_empty();
    let report = plain_report(&outcome);
    match outcome {
        FetchOutcome::Exhausted { .. } | FetchOutcome::TransientFailure(_) => {
            anyhow::bail!("{}", report.trim_end())
        }
        _ => Ok(report),
    }
}

/// Entry point for `results-bot check`.
pub async fn run_check(admission_no: &str, first_name: &str, attempts: Option<u32>) -> Result<()> {
    init_cli_tracing()?;

    let client = ClientConfig::from_env();
    client.validate()?;
    let query = ResultQuery::new(admission_no, first_name).context("Invalid lookup input")?;
    let fetcher = ResultFetcher::new(check_policy(&client, attempts))
        .context("Failed to build results HTTP client")?
        .with_endpoint(client.results_api_url.clone());

    let report = check(&fetcher, &query).await?;
    print!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use results_client::DEFAULT_ENDPOINT;

    fn client(timeout_secs: Option<u64>) -> ClientConfig {
        ClientConfig {
            results_api_url: DEFAULT_ENDPOINT.to_string(),
            max_attempts: Some(2),
            timeout_secs,
        }
    }

    #[test]
    fn test_check_policy_is_batch_preset() {
        let policy = check_policy(&client(None), None);
        assert_eq!(policy, RetryPolicy::batch());
    }

    #[test]
    fn test_check_policy_overrides() {
        let policy = check_policy(&client(Some(7)), Some(9));
        assert_eq!(policy.max_attempts, 9);
        assert_eq!(policy.timeout_per_attempt, Duration::from_secs(7));
        assert_eq!(policy.backoff_cap, RetryPolicy::batch().backoff_cap);
    }
}
