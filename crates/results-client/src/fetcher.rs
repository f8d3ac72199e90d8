//! The retry loop around the results endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::headers::{choose_profile, HeaderProfile};
use crate::outcome::{FailureReason, FetchOutcome};
use crate::payload::ResultPayload;
use crate::policy::RetryPolicy;
use crate::query::{ResultQuery, ResultRequest};
use crate::transport::{HttpTransport, RawResponse, Transport, TransportError};

/// Production results endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.eaes.et/api/v1/results/web";

/// Upstream response bodies are cut to this many characters in logs.
const BODY_LOG_LIMIT: usize = 500;

/// Something that can look up results for a query. Lets the conversation layer run against a
/// stub in tests.
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn lookup(&self, query: &ResultQuery) -> FetchOutcome;
}

/// Bookkeeping for one attempt; logged, then dropped.
#[derive(Debug)]
struct RequestAttempt {
    index: u32,
    max_attempts: u32,
    profile: &'static HeaderProfile,
    waited: Duration,
}

impl RequestAttempt {
    fn record(&self, result: &Result<ResultPayload, FailureReason>) {
        match result {
            Ok(payload) => info!(
                attempt = self.index,
                max_attempts = self.max_attempts,
                profile = self.profile.name,
                waited_secs = self.waited.as_secs_f64(),
                subjects = payload.subjects.len(),
                "Results request succeeded"
            ),
            Err(reason) => warn!(
                attempt = self.index,
                max_attempts = self.max_attempts,
                profile = self.profile.name,
                waited_secs = self.waited.as_secs_f64(),
                reason = %reason,
                "Results request failed"
            ),
        }
    }
}

/// Fetches results with bounded retries. Holds no per-request state, so one instance can be
/// shared (e.g. behind an `Arc`) by any number of concurrent lookups.
///
/// Dropping a `fetch` future abandons the lookup at its next suspension point.
#[derive(Debug, Clone)]
pub struct ResultFetcher<T = HttpTransport> {
    transport: T,
    endpoint: String,
    policy: RetryPolicy,
}

impl ResultFetcher<HttpTransport> {
    /// Fetcher for the production endpoint over a fresh reqwest client.
    pub fn new(policy: RetryPolicy) -> Result<Self, TransportError> {
        Ok(Self::with_transport(HttpTransport::new()?, policy))
    }
}

impl<T: Transport> ResultFetcher<T> {
    pub fn with_transport(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            policy,
        }
    }

    /// Overrides the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up results using the configured policy.
    pub async fn fetch(&self, query: &ResultQuery) -> FetchOutcome {
        self.fetch_with(
            query,
            self.policy.max_attempts,
            self.policy.timeout_per_attempt,
        )
        .await
    }

    /// Looks up results with an explicit attempt budget and per-attempt timeout.
    ///
    /// Returns [`FetchOutcome::Success`] on the first parsed 200, otherwise
    /// [`FetchOutcome::Exhausted`] once `max_attempts` (at least 1) attempts have failed.
    /// Empty payloads are returned as `Success`; see [`FetchOutcome::resolve_empty`].
    #[instrument(level = "debug", skip(self, query), fields(admission_no = %query.identifier()))]
    pub async fn fetch_with(
        &self,
        query: &ResultQuery,
        max_attempts: u32,
        timeout_per_attempt: Duration,
    ) -> FetchOutcome {
        let max_attempts = max_attempts.max(1);
        let body = query.to_request();
        let mut last_failure: Option<FailureReason> = None;

        for index in 1..=max_attempts {
            let waited = self
                .policy
                .delay_before(index, last_failure.as_ref(), &mut rand::thread_rng());
            if !waited.is_zero() {
                info!(
                    attempt = index,
                    max_attempts,
                    wait_secs = waited.as_secs_f64(),
                    "Waiting before retry"
                );
                tokio::time::sleep(waited).await;
            }

            let attempt = RequestAttempt {
                index,
                max_attempts,
                profile: choose_profile(&mut rand::thread_rng()),
                waited,
            };
            let result = self
                .attempt(&body, attempt.profile, timeout_per_attempt, index == max_attempts)
                .await;
            attempt.record(&result);

            match result {
                Ok(payload) => return FetchOutcome::Success(payload),
                Err(reason) => last_failure = Some(reason),
            }
        }

        warn!(
            attempts = max_attempts,
            last_failure = ?last_failure,
            "Results request retries exhausted"
        );
        FetchOutcome::Exhausted {
            attempts: max_attempts,
            last_failure,
        }
    }

    /// A single attempt with no retry: `Success` or `TransientFailure`.
    pub async fn fetch_once(&self, query: &ResultQuery) -> FetchOutcome {
        let profile = choose_profile(&mut rand::thread_rng());
        match self
            .attempt(
                &query.to_request(),
                profile,
                self.policy.timeout_per_attempt,
                true,
            )
            .await
        {
            Ok(payload) => FetchOutcome::Success(payload),
            Err(reason) => FetchOutcome::TransientFailure(reason),
        }
    }

    async fn attempt(
        &self,
        body: &ResultRequest<'_>,
        profile: &'static HeaderProfile,
        timeout: Duration,
        is_final: bool,
    ) -> Result<ResultPayload, FailureReason> {
        let sent = self.transport.post_json(&self.endpoint, profile, body, timeout);
        let response = match tokio::time::timeout(timeout, sent).await {
            Err(_) => return Err(FailureReason::Timeout),
            Ok(Err(e)) => return Err(e.into()),
            Ok(Ok(response)) => response,
        };
        classify_response(response, is_final)
    }
}

/// Maps an HTTP exchange to a parsed payload or a failure reason. Bodies of unexpected statuses
/// are logged at warn on the final attempt and at debug otherwise.
pub fn classify_response(
    response: RawResponse,
    is_final: bool,
) -> Result<ResultPayload, FailureReason> {
    match response.status {
        200..=299 => ResultPayload::parse(&response.body)
            .map_err(|e| FailureReason::Malformed(e.to_string())),
        429 => Err(FailureReason::RateLimited),
        503 => Err(FailureReason::ServiceUnavailable),
        status => {
            let body: String = response.body.chars().take(BODY_LOG_LIMIT).collect();
            if is_final {
                warn!(status, body = %body, "Unexpected status on final attempt");
            } else {
                debug!(status, body = %body, "Unexpected status");
            }
            Err(FailureReason::UnexpectedStatus(status))
        }
    }
}

#[async_trait]
impl<T: Transport> ResultSource for ResultFetcher<T> {
    async fn lookup(&self, query: &ResultQuery) -> FetchOutcome {
        self.fetch(query).await
    }
}
