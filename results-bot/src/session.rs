//! ResultsSession: drives one conversation step end to end (replies, lookup, rendering).
//!
//! Lookups run in their own task so the chat's update queue is not blocked while the client
//! retries. Each chat has at most one lookup in flight; `/cancel` or a newer lookup cancels it,
//! which drops the fetch future and abandons any pending attempt.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use results_client::{ResultQuery, ResultSource};
use results_core::{Bot, Chat, Reply};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use crate::conversation::{step, Command, Input, State};
use crate::format::render_outcome;
use crate::media::MediaSelector;

/// Result of [`ResultsSession::handle`].
#[derive(Debug)]
pub struct Handled {
    pub next: State,
    /// The background lookup started by this step. Dropping the handle detaches the task.
    pub lookup: Option<JoinHandle<()>>,
}

#[derive(Debug)]
struct InFlight {
    id: u64,
    token: CancellationToken,
}

/// Shared by every chat.
#[derive(Clone)]
pub struct ResultsSession {
    bot: Arc<dyn Bot>,
    source: Arc<dyn ResultSource>,
    media: MediaSelector,
    in_flight: Arc<Mutex<HashMap<i64, InFlight>>>,
    next_lookup_id: Arc<AtomicU64>,
}

impl ResultsSession {
    pub fn new(bot: Arc<dyn Bot>, source: Arc<dyn ResultSource>, media: MediaSelector) -> Self {
        Self {
            bot,
            source,
            media,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_lookup_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Applies `input` to `state`, sends the resulting replies, and starts a lookup when one is
    /// due. Delivery failures are logged, never returned.
    #[instrument(skip(self, state, input), fields(chat_id = chat.id))]
    pub async fn handle(&self, chat: &Chat, state: &State, input: Input) -> Handled {
        if input == Input::Command(Command::Cancel) {
            self.cancel_lookup(chat);
        }

        let step = step(state, input);
        self.deliver(chat, &step.replies).await;

        Handled {
            next: step.next,
            lookup: step.lookup.map(|query| self.spawn_lookup(*chat, query)),
        }
    }

    /// Number of chats with a lookup in flight.
    pub fn lookups_in_flight(&self) -> usize {
        self.lock_in_flight().len()
    }

    fn spawn_lookup(&self, chat: Chat, query: ResultQuery) -> JoinHandle<()> {
        let id = self.next_lookup_id.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        let previous = self.lock_in_flight().insert(
            chat.id,
            InFlight {
                id,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            info!(chat_id = chat.id, "Replacing lookup in flight");
            previous.token.cancel();
        }

        let session = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    info!(chat_id = chat.id, "Lookup cancelled");
                }
                _ = session.run_lookup(&chat, &query) => {}
            }
            session.finish_lookup(chat.id, id);
        })
    }

    async fn run_lookup(&self, chat: &Chat, query: &ResultQuery) {
        debug!(
            chat_id = chat.id,
            admission_no = %query.identifier(),
            "step: looking up results"
        );
        let outcome = self.source.lookup(query).await.resolve_empty();
        info!(
            chat_id = chat.id,
            success = outcome.is_success(),
            "step: lookup finished"
        );
        let replies = render_outcome(&outcome, &self.media);
        self.deliver(chat, &replies).await;
    }

    fn cancel_lookup(&self, chat: &Chat) {
        if let Some(in_flight) = self.lock_in_flight().remove(&chat.id) {
            info!(chat_id = chat.id, "Cancelling lookup in flight");
            in_flight.token.cancel();
        }
    }

    /// Forgets lookup `id` unless a newer one already took its place.
    fn finish_lookup(&self, chat_id: i64, id: u64) {
        let mut in_flight = self.lock_in_flight();
        if in_flight.get(&chat_id).is_some_and(|f| f.id == id) {
            in_flight.remove(&chat_id);
        }
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, HashMap<i64, InFlight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn deliver(&self, chat: &Chat, replies: &[Reply]) {
        for reply in replies {
            if let Err(e) = self.bot.send_reply(chat, reply).await {
                error!(error = %e, chat_id = chat.id, "Failed to send reply");
            }
        }
    }
}
