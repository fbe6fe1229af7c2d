//! Write and read paths over the local and remote stores.
//!
//! Writes always land in the local store first and are then handed to the
//! remote store in a background task whose outcome is only logged. Reads
//! prefer the remote listing and fall back to the whole local collection on
//! any failure; remote and local data are never merged.

use std::sync::Arc;

use chrono::Utc;
use noor_shared::{Submission, SubmissionDraft};
use noor_store::SubmissionStore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{RemoteError, SyncError};
use crate::remote::RemoteStore;

/// Which records a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Everything, published or not (admin view).
    All,
    /// Only records with the display flag set (archive view).
    Published,
}

/// Filter to `scope`, then order most recent first.
///
/// The sort is stable, so records sharing a timestamp keep their relative
/// order.
pub fn arrange(mut submissions: Vec<Submission>, scope: Scope) -> Vec<Submission> {
    if scope == Scope::Published {
        submissions.retain(Submission::is_published);
    }
    submissions.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    submissions
}

/// Acknowledgment returned once a submission is stored locally.
#[derive(Debug)]
pub struct SubmissionReceipt {
    pub submission: Submission,
    delivery: Option<JoinHandle<()>>,
}

impl SubmissionReceipt {
    /// Whether a remote delivery task was started.
    pub fn delivery_started(&self) -> bool {
        self.delivery.is_some()
    }

    /// Wait for the background delivery to finish. Its outcome has already
    /// been logged and does not change the receipt.
    pub async fn wait_for_delivery(self) {
        if let Some(handle) = self.delivery {
            if let Err(e) = handle.await {
                warn!(error = %e, "remote delivery task did not complete");
            }
        }
    }
}

/// Orchestrates the local store and the remote store.
pub struct SyncCoordinator<S> {
    store: S,
    remote: Arc<dyn RemoteStore>,
}

impl<S: SubmissionStore> SyncCoordinator<S> {
    pub fn new(store: S, remote: Arc<dyn RemoteStore>) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate `draft`, persist it locally and start the remote delivery.
    ///
    /// Returns as soon as the local write is done. Remote delivery needs a
    /// Tokio runtime; without one it is skipped with a warning.
    pub fn record_submission(&self, draft: SubmissionDraft) -> Result<SubmissionReceipt, SyncError> {
        let draft = draft.validate()?;

        let submissions = self.store.load()?;

        // never earlier than anything already stored
        let latest = submissions.iter().map(Submission::timestamp).max();
        let now = Utc::now().timestamp_millis();
        let timestamp = latest.map_or(now, |latest| now.max(latest));

        let submission = Submission::create(draft, timestamp, &mut rand::thread_rng())?;
        self.store.append(&submission)?;

        info!(
            timestamp,
            kind = %submission.kind(),
            anonymous = submission.is_anonymous(),
            published = submission.is_published(),
            "submission stored locally"
        );

        let delivery = self.spawn_delivery(submission.clone());
        Ok(SubmissionReceipt {
            submission,
            delivery,
        })
    }

    fn spawn_delivery(&self, submission: Submission) -> Option<JoinHandle<()>> {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("no async runtime, remote delivery skipped");
                return None;
            }
        };

        let remote = Arc::clone(&self.remote);
        Some(handle.spawn(async move {
            match remote.submit(&submission).await {
                Ok(()) => {}
                Err(RemoteError::NotConfigured) => {
                    debug!("no submit endpoint, submission kept local only");
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        timestamp = submission.timestamp(),
                        "failed to send submission to remote store"
                    );
                }
            }
        }))
    }

    /// Listing for a viewer page: remote if it answers with a well-formed
    /// list, otherwise the local collection. Filtering is always re-applied.
    pub async fn list_submissions(&self, scope: Scope) -> Vec<Submission> {
        let fetched = match scope {
            Scope::All => self.remote.fetch_all().await,
            Scope::Published => self.remote.fetch_published().await,
        };

        let working_set = match fetched {
            Ok(submissions) => {
                debug!(count = submissions.len(), ?scope, "using remote submissions");
                submissions
            }
            Err(RemoteError::NotConfigured) => self.load_or_empty(),
            Err(e) => {
                warn!(error = %e, ?scope, "remote fetch failed, falling back to local store");
                self.load_or_empty()
            }
        };

        arrange(working_set, scope)
    }

    /// Listing built from the local store only, for re-rendering the
    /// submission page right after a write.
    pub fn local_submissions(&self, scope: Scope) -> Vec<Submission> {
        arrange(self.load_or_empty(), scope)
    }

    fn load_or_empty(&self) -> Vec<Submission> {
        self.store.load().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to read local store");
            Vec::new()
        })
    }
}
