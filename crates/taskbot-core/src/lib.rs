//! `taskbot-core` — domain model and conversation logic for taskbot.
//!
//! Everything in this crate is transport-free: records, free-text parsing,
//! the per-user session state machine, callback-token codec, screen
//! rendering, and the [`Store`] contract the spreadsheet backend implements.
//! The Telegram and Google Sheets crates sit at the edges and only move
//! bytes; all decisions happen here, which is what makes the conversation
//! flows testable against [`memory::MemoryStore`].

pub mod callback;
pub mod controller;
pub mod error;
pub mod event;
pub mod memory;
pub mod note;
pub mod project;
pub mod render;
pub mod secret;
pub mod session;
pub mod store;
pub mod task;
pub mod types;

pub use error::{ParseError, Result, StoreError};
pub use store::Store;
