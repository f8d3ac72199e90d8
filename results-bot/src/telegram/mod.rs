//! Telegram transport: teloxide dispatcher wiring for the lookup conversation.

pub mod dispatcher;

pub use dispatcher::{run_dispatcher, schema, ResultsDialogue};
