//! The two-step lookup conversation as a pure state machine.
//!
//! [`step`] maps (state, input) to the next state, the replies to send right away, and
//! optionally a query to look up. Running the lookup and rendering its outcome is left to
//! [`crate::session::ResultsSession`], so this module has no I/O and is tested directly.

use results_client::{QueryError, ResultQuery};
use results_core::{Action, Reply};
use teloxide::utils::command::BotCommands;

use crate::messages;

/// Per-chat conversation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    AwaitingAdmission,
    AwaitingName {
        admission_no: String,
    },
}

#[derive(BotCommands, Debug, Clone, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "welcome message")]
    Start,
    #[command(description = "start checking results")]
    Check,
    #[command(description = "show help")]
    Help,
    #[command(description = "cancel the current operation")]
    Cancel,
}

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Action(Action),
    Text(String),
    /// Sticker, photo or any other message without text.
    NonText,
}

/// Outcome of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub next: State,
    pub replies: Vec<Reply>,
    pub lookup: Option<ResultQuery>,
}

impl Step {
    fn reply(next: State, reply: Reply) -> Self {
        Self {
            next,
            replies: vec![reply],
            lookup: None,
        }
    }
}

pub fn step(state: &State, input: Input) -> Step {
    match input {
        Input::Command(Command::Start) => Step::reply(
            State::Idle,
            Reply::with_keyboard(messages::WELCOME, messages::start_keyboard()),
        ),
        Input::Command(Command::Check) | Input::Action(Action::StartCheck) => {
            Step::reply(State::AwaitingAdmission, Reply::text(messages::ASK_ADMISSION))
        }
        Input::Command(Command::Help) | Input::Action(Action::Help) => Step::reply(
            state.clone(),
            Reply::with_keyboard(messages::HELP, messages::help_keyboard()),
        ),
        Input::Command(Command::Cancel) => {
            Step::reply(State::Idle, Reply::text(messages::CANCELLED))
        }
        // Unrecognized commands never count as an answer.
        Input::Text(text) if text.trim_start().starts_with('/') => reprompt(state),
        Input::Text(text) => on_text(state, &text),
        Input::NonText => reprompt(state),
    }
}

fn reprompt(state: &State) -> Step {
    match state {
        State::Idle => Step::reply(State::Idle, Reply::text(messages::IDLE_HINT)),
        State::AwaitingAdmission => {
            Step::reply(state.clone(), Reply::text(messages::INVALID_ADMISSION))
        }
        State::AwaitingName { .. } => {
            Step::reply(state.clone(), Reply::text(messages::INVALID_NAME))
        }
    }
}

fn on_text(state: &State, text: &str) -> Step {
    match state {
        State::Idle => reprompt(state),
        State::AwaitingAdmission => {
            let admission_no = text.trim();
            if admission_no.is_empty() {
                return Step::reply(state.clone(), Reply::text(messages::INVALID_ADMISSION));
            }
            Step::reply(
                State::AwaitingName {
                    admission_no: admission_no.to_string(),
                },
                Reply::text(messages::ask_name(admission_no)),
            )
        }
        State::AwaitingName { admission_no } => match ResultQuery::new(admission_no, text) {
            Ok(query) => Step {
                next: State::Idle,
                replies: vec![Reply::text(messages::CHECKING)],
                lookup: Some(query),
            },
            Err(QueryError::EmptyName) => {
                Step::reply(state.clone(), Reply::text(messages::INVALID_NAME))
            }
            Err(QueryError::EmptyIdentifier) => {
                Step::reply(State::AwaitingAdmission, Reply::text(messages::INVALID_ADMISSION))
            }
        },
    }
}
