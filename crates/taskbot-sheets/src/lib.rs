//! `taskbot-sheets` — the spreadsheet datastore.
//!
//! Implements [`taskbot_core::Store`] against the Google Sheets v4 REST API:
//! one worksheet per record kind, first row a header, every record an
//! appended row. [`store::SheetsStore`] owns the semantics (id assignment,
//! id→row lookup, idempotent bootstrap); [`client::SheetsClient`] only
//! speaks HTTP.

pub mod auth;
pub mod client;
pub mod schema;
pub mod store;

pub use auth::{Credentials, ServiceAccountKey};
pub use client::SheetsClient;
pub use store::SheetsStore;
