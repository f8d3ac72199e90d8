//! Bot abstraction for delivering replies.
//!
//! [`Bot`] is transport-agnostic; [`TelegramBot`] implements it via teloxide.

use crate::error::{BotError, Result};
use crate::types::{Chat, Keyboard, Reply};
use async_trait::async_trait;
use std::path::Path;
use teloxide::{
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, ParseMode},
};
use tracing::warn;

/// Abstraction for sending replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends HTML text, optionally with an inline keyboard.
    async fn send_text(&self, chat: &Chat, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;

    /// Uploads a local animation file with an HTML caption.
    async fn send_animation(&self, chat: &Chat, path: &Path, caption: &str) -> Result<()>;

    /// Delivers one [`Reply`]. A failed animation upload degrades to its caption as text.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<()> {
        match reply {
            Reply::Text { text, keyboard } => self.send_text(chat, text, keyboard.as_ref()).await,
            Reply::Animation { path, caption } => {
                if let Err(e) = self.send_animation(chat, path, caption).await {
                    warn!(
                        chat_id = chat.id,
                        path = %path.display(),
                        error = %e,
                        "Animation upload failed, sending caption as text"
                    );
                    return self.send_text(chat, caption, None).await;
                }
                Ok(())
            }
        }
    }
}

/// Teloxide-based implementation of [`Bot`].
#[derive(Clone)]
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Wraps an already configured teloxide bot (e.g. one with a custom API URL).
    pub fn from_bot(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Converts a core [`Keyboard`] into Telegram inline markup.
pub fn to_inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.callback_data()))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl Bot for TelegramBot {
    async fn send_text(&self, chat: &Chat, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_inline_markup(keyboard));
        }
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_animation(&self, chat: &Chat, path: &Path, caption: &str) -> Result<()> {
        self.bot
            .send_animation(ChatId(chat.id), InputFile::file(path.to_path_buf()))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
