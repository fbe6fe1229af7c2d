//! # noor-store
//!
//! Durable local storage for Noor submissions, backed by SQLite.
//!
//! The database exposes a small origin-style key/value table (see
//! [`Database::get_item`]) and the whole submission collection is kept as a
//! single JSON array under [`SUBMISSIONS_KEY`]. Every write rewrites the full
//! collection; there is no partial update.
//!
//! [`SUBMISSIONS_KEY`]: noor_shared::constants::SUBMISSIONS_KEY

pub mod database;
pub mod local_storage;
pub mod migrations;
pub mod submissions;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use submissions::SubmissionStore;
