//! Dispatcher: routes commands, text messages and button presses through a per-chat dialogue.
//! Distinct chats are served concurrently; updates within one chat are handled in order.

use std::sync::Arc;

use results_core::{Action, Chat};
use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateHandler,
    },
    prelude::*,
    types::CallbackQuery,
};
use tracing::{info, instrument, warn};

use crate::conversation::{Command, Input, State};
use crate::session::ResultsSession;

pub type ResultsDialogue = Dialogue<State, InMemStorage<State>>;

type DispatchError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), DispatchError>;

/// Update handler tree. Needs `InMemStorage<State>` and `Arc<ResultsSession>` as dependencies.
pub fn schema() -> UpdateHandler<DispatchError> {
    let messages = Update::filter_message()
        .branch(teloxide::filter_command::<Command, _>().endpoint(on_command))
        .branch(dptree::endpoint(on_message));

    let callbacks = Update::filter_callback_query().endpoint(on_callback);

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(messages)
        .branch(callbacks)
}

async fn on_command(
    dialogue: ResultsDialogue,
    state: State,
    session: Arc<ResultsSession>,
    cmd: Command,
) -> HandlerResult {
    info!(chat_id = dialogue.chat_id().0, command = ?cmd, "Received command");
    advance(&dialogue, &session, &state, Input::Command(cmd)).await
}

async fn on_message(
    dialogue: ResultsDialogue,
    state: State,
    session: Arc<ResultsSession>,
    msg: Message,
) -> HandlerResult {
    let input = match msg.text() {
        Some(text) => {
            info!(chat_id = msg.chat.id.0, "Received text message");
            Input::Text(text.to_string())
        }
        None => {
            info!(chat_id = msg.chat.id.0, "Received non-text message");
            Input::NonText
        }
    };
    advance(&dialogue, &session, &state, input).await
}

async fn on_callback(
    bot: teloxide::Bot,
    dialogue: ResultsDialogue,
    state: State,
    session: Arc<ResultsSession>,
    q: CallbackQuery,
) -> HandlerResult {
    // Stop the client-side spinner first; the lookup may take a while.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    match Action::from_callback_data(data) {
        Ok(action) => {
            info!(chat_id = dialogue.chat_id().0, ?action, "Received button press");
            advance(&dialogue, &session, &state, Input::Action(action)).await
        }
        Err(e) => {
            warn!(chat_id = dialogue.chat_id().0, error = %e, "Ignoring callback");
            Ok(())
        }
    }
}

async fn advance(
    dialogue: &ResultsDialogue,
    session: &ResultsSession,
    state: &State,
    input: Input,
) -> HandlerResult {
    let chat = Chat::new(dialogue.chat_id().0);
    // A lookup, if any, keeps running in the background so this chat's queue stays free
    // for /cancel.
    let handled = session.handle(&chat, state, input).await;
    dialogue.update(handled.next).await?;
    Ok(())
}

/// Runs long polling until Ctrl-C.
#[instrument(skip(bot, session))]
pub async fn run_dispatcher(bot: teloxide::Bot, session: Arc<ResultsSession>) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![InMemStorage::<State>::new(), session])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builds_without_dependencies() {
        let _handler: UpdateHandler<DispatchError> = schema();
    }
}
