//! Core types: chat identity, inline keyboard actions, and outgoing replies.
//!
//! Reply text is HTML (Telegram `parse_mode=HTML`); callers escape user-derived content.

use std::path::PathBuf;

use crate::error::HandlerError;

/// Chat (private or group) identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chat {
    pub id: i64,
}

impl Chat {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// Action carried by an inline keyboard button; round-trips through Telegram callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start (or restart) the two-step result lookup.
    StartCheck,
    /// Show usage help.
    Help,
}

impl Action {
    /// Callback data sent to Telegram for this action.
    pub fn callback_data(&self) -> &'static str {
        match self {
            Action::StartCheck => "start_check",
            Action::Help => "help",
        }
    }

    /// Parses callback data received from Telegram.
    pub fn from_callback_data(data: &str) -> Result<Self, HandlerError> {
        match data {
            "start_check" => Ok(Action::StartCheck),
            "help" => Ok(Action::Help),
            other => Err(HandlerError::UnknownAction(other.to_string())),
        }
    }
}

/// One inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Inline keyboard: rows of buttons, rendered top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Keyboard with one button per row.
    pub fn column(buttons: Vec<Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }
}

/// A single outgoing message produced by the conversation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// HTML text with an optional inline keyboard.
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    /// Animation uploaded from a local file; the caption goes out as plain text if the upload fails.
    Animation {
        path: PathBuf,
        caption: String,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Text body of the reply (caption for animations).
    pub fn body(&self) -> &str {
        match self {
            Reply::Text { text, .. } => text,
            Reply::Animation { caption, .. } => caption,
        }
    }
}
