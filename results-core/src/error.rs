use thiserror::Error;

/// Reply delivery failed.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Telegram API error: {0}")]
    Bot(String),
}

/// An update the bot could not interpret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Unknown callback action: {0}")]
    UnknownAction(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
