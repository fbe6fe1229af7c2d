use thiserror::Error;

use noor_shared::ValidationError;
use noor_store::StoreError;

/// Why a remote call produced no usable result.
///
/// Callers treat every variant the same way (fall back to local data, or
/// drop the delivery); the variants only make log lines more useful.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Remote endpoint not configured")]
    NotConfigured,

    #[error("Remote request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Remote response is not a JSON array")]
    NotASequence,
}

/// Failures of the write path. Nothing has been persisted when one is returned.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Local store error: {0}")]
    Store(#[from] StoreError),
}
