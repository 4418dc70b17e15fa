//! `taskbot-telegram` — a small typed client for the Telegram Bot API.
//!
//! Covers exactly what the bot needs: `getUpdates` long-polling,
//! `sendMessage`, `editMessageText`, `answerCallbackQuery`, and the
//! edit-or-send render contract ([`Bot::render`]). Request and response
//! payloads are fully typed; no `serde_json::Value` plumbing leaks to
//! callers.

pub mod client;
pub mod error;
pub mod types;

pub use client::Bot;
pub use error::{Result, TelegramError};
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
};
