//! # noor-shared
//!
//! Types shared by every Noor crate: the [`Submission`] record, the author
//! supplied [`SubmissionDraft`], pseudonym generation and the validation
//! errors raised before anything is persisted.

pub mod constants;
pub mod error;
pub mod pseudonym;
pub mod types;

pub use error::ValidationError;
pub use types::{DecodedList, Submission, SubmissionDraft, SubmissionKind};
