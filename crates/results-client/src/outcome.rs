//! Fetch outcomes and failure classification.

use thiserror::Error;

use crate::payload::ResultPayload;
use crate::transport::TransportError;

/// Why a single attempt failed. Every variant is considered transient and retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("rate limited (429)")]
    RateLimited,

    #[error("service unavailable (503)")]
    ServiceUnavailable,

    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<TransportError> for FailureReason {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => FailureReason::Timeout,
            TransportError::Connection(msg) => FailureReason::Connection(msg),
            TransportError::Request(msg) => FailureReason::Transport(msg),
        }
    }
}

/// Result of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A parsed 200 response.
    Success(ResultPayload),
    /// A valid response with no subject entries. Produced by [`FetchOutcome::resolve_empty`].
    NotFound,
    /// A single attempt failed (only from [`crate::ResultFetcher::fetch_once`]).
    TransientFailure(FailureReason),
    /// Every attempt failed. `last_failure` is the classification of the final attempt.
    Exhausted {
        attempts: u32,
        last_failure: Option<FailureReason>,
    },
}

impl FetchOutcome {
    /// Caller-side step: turns a success without subject entries into [`FetchOutcome::NotFound`].
    ///
    /// The API answers wrong credentials and unpublished results the same way, with an empty
    /// `results` array, so both end up here.
    pub fn resolve_empty(self) -> Self {
        match self {
            FetchOutcome::Success(payload) if payload.is_empty() => FetchOutcome::NotFound,
            other => other,
        }
    }

    pub fn payload(&self) -> Option<&ResultPayload> {
        match self {
            FetchOutcome::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}
