//! # Grade 12 results bot
//!
//! Telegram front end for the results lookup: a two-step dialogue (admission number, then first
//! name) per chat, the retrying client from `results-client`, verdict animations, and a small
//! health endpoint. The `check` subcommand runs the same lookup from a terminal.

pub mod check;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod format;
pub mod health;
pub mod media;
pub mod messages;
pub mod runner;
pub mod session;
pub mod telegram;

pub use check::run_check;
pub use cli::{load_config, Cli, Commands};
pub use config::{BotConfig, ClientConfig};
pub use conversation::{step, Command, Input, State, Step};
pub use media::{MediaChoice, MediaSelector, Verdict, PASS_THRESHOLD};
pub use runner::run_bot;
pub use session::{Handled, ResultsSession};
