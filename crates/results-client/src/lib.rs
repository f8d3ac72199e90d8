//! # results-client
//!
//! Client for the EAES grade 12 results endpoint (`POST /api/v1/results/web`).
//!
//! [`ResultFetcher`] turns a [`ResultQuery`] into a [`FetchOutcome`]. It never returns an error:
//! transport failures, timeouts, throttling and malformed bodies are classified as
//! [`FailureReason`]s and retried according to a [`RetryPolicy`] until the attempt budget runs out.
//!
//! ## Retry schedule
//!
//! - No wait before the first attempt.
//! - Before attempt *n* (n ≥ 2): `min(2^(n-1) + U(0,1), cap)` seconds.
//! - After a 429 or 503 the wait is at least the policy's fixed, jittered delay for that status.
//!
//! Two presets exist: [`RetryPolicy::interactive`] (chat users waiting on a reply) and
//! [`RetryPolicy::batch`] (one-shot CLI lookups that can afford to wait longer).
//!
//! ## Example
//!
//! ```rust,no_run
//! use results_client::{FetchOutcome, ResultFetcher, ResultQuery, RetryPolicy};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let fetcher = ResultFetcher::new(RetryPolicy::interactive())?;
//!     let query = ResultQuery::new("1234567890", "Abebe")?;
//!
//!     match fetcher.fetch(&query).await.resolve_empty() {
//!         FetchOutcome::Success(payload) => println!("aggregate: {:?}", payload.aggregate_score()),
//!         FetchOutcome::NotFound => println!("no results"),
//!         other => println!("failed: {:?}", other),
//!     }
//!     Ok(())
//! }
//! ```

pub mod fetcher;
pub mod headers;
pub mod outcome;
pub mod payload;
pub mod policy;
pub mod query;
pub mod transport;

pub use fetcher::{ResultFetcher, ResultSource, DEFAULT_ENDPOINT};
pub use headers::{choose_profile, HeaderProfile, HEADER_POOL};
pub use outcome::{FailureReason, FetchOutcome};
pub use payload::{PayloadError, ResultPayload, Score, StudentInfo, SubjectResult, UNAVAILABLE};
pub use policy::{JitteredDelay, RetryPolicy};
pub use query::{QueryError, ResultQuery, ResultRequest};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
