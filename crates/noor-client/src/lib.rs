//! # noor-client
//!
//! Keeps a local copy of every submission consistent with a best-effort
//! remote store, and reconciles the two when a page lists submissions.

pub mod config;
pub mod error;
pub mod remote;
pub mod sync;
pub mod view;

use tracing_subscriber::{fmt, EnvFilter};

pub use config::{ClientConfig, RemoteEndpoints};
pub use error::{RemoteError, SyncError};
pub use remote::{HttpRemoteStore, RemoteStore};
pub use sync::{arrange, Scope, SubmissionReceipt, SyncCoordinator};
pub use view::{Card, CardBody, ViewerRole};

/// Install the global tracing subscriber (respects `RUST_LOG`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,noor_client=debug,noor_store=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
