//! # results-core
//!
//! Core types and traits for the results bot: [`Bot`] delivery trait, outgoing [`Reply`] and
//! keyboard types, error types, and tracing initialization. Knows nothing about the results API;
//! used by results-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, TelegramBot};
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_cli_tracing, init_tracing};
pub use types::{Action, Button, Chat, Keyboard, Reply};
