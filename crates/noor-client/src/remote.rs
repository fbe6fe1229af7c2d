//! Best-effort access to the remote submission store.
//!
//! The remote store is an opaque append/query service: submissions are POSTed
//! as JSON and listings come back as JSON arrays of the same objects. A listing
//! is judged by its body alone: any JSON array is used, whatever the status
//! code, and elements that do not decode are skipped. Nothing here retries;
//! every failure is handed back as a [`RemoteError`] for the caller to log and
//! route around.

use async_trait::async_trait;
use noor_shared::{DecodedList, Submission};
use serde_json::Value;

use crate::config::RemoteEndpoints;
use crate::error::RemoteError;

/// Network accessor for the canonical store.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Deliver one record. The response body, if any, is ignored.
    async fn submit(&self, submission: &Submission) -> Result<(), RemoteError>;

    /// Every record the remote store holds.
    async fn fetch_all(&self) -> Result<Vec<Submission>, RemoteError>;

    /// Records the remote store claims are published. The claim is not
    /// trusted; callers still filter.
    async fn fetch_published(&self) -> Result<Vec<Submission>, RemoteError>;
}

/// [`RemoteStore`] over HTTP.
#[derive(Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    endpoints: RemoteEndpoints,
}

impl HttpRemoteStore {
    pub fn new(endpoints: RemoteEndpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    /// A store with no endpoints; every call reports [`RemoteError::NotConfigured`].
    pub fn disabled() -> Self {
        Self::new(RemoteEndpoints::default())
    }

    async fn fetch(&self, url: Option<&str>) -> Result<Vec<Submission>, RemoteError> {
        let url = url.ok_or(RemoteError::NotConfigured)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        let Value::Array(items) = body else {
            return Err(RemoteError::NotASequence);
        };

        let decoded = DecodedList::from_values(items);
        if decoded.skipped > 0 {
            tracing::warn!(url, skipped = decoded.skipped, "ignoring malformed remote submissions");
        }

        tracing::debug!(
            url,
            %status,
            count = decoded.submissions.len(),
            "fetched remote submissions"
        );
        Ok(decoded.submissions)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn submit(&self, submission: &Submission) -> Result<(), RemoteError> {
        let url = self
            .endpoints
            .submit
            .as_deref()
            .ok_or(RemoteError::NotConfigured)?;

        self.client
            .post(url)
            .json(submission)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!(url, timestamp = submission.timestamp(), "submission delivered");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Submission>, RemoteError> {
        self.fetch(self.endpoints.fetch_all.as_deref()).await
    }

    async fn fetch_published(&self) -> Result<Vec<Submission>, RemoteError> {
        self.fetch(self.endpoints.fetch_published.as_deref()).await
    }
}
