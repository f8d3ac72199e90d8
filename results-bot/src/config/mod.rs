//! Bot configuration: Telegram connection, logging, health server, assets ([`BotConfig`]) plus
//! the results API client ([`ClientConfig`]). Loaded from env.

mod bot_config;
mod client;


pub use bot_config::BotConfig;
pub use client::ClientConfig;
