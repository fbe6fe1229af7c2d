//! Client configuration loaded from environment variables.
//!
//! Everything defaults to "unset": with no endpoints the client works purely
//! against the local database.

use std::path::PathBuf;

use noor_shared::constants::PUBLISHED_QUERY;
use reqwest::Url;

/// Addresses of the remote store. `None` disables the matching accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteEndpoints {
    pub submit: Option<String>,
    pub fetch_all: Option<String>,
    pub fetch_published: Option<String>,
}

impl RemoteEndpoints {
    /// Use one endpoint for everything; the published listing is the same
    /// address with `published=true` appended.
    pub fn single(endpoint: &str) -> Self {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Self::default();
        }

        Self {
            submit: Some(endpoint.to_string()),
            fetch_all: Some(endpoint.to_string()),
            fetch_published: published_url(endpoint),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.submit.is_none() && self.fetch_all.is_none() && self.fetch_published.is_none()
    }
}

fn published_url(endpoint: &str) -> Option<String> {
    match Url::parse(endpoint) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .append_pair(PUBLISHED_QUERY.0, PUBLISHED_QUERY.1);
            Some(url.to_string())
        }
        Err(e) => {
            tracing::warn!(value = %endpoint, error = %e, "Invalid endpoint URL, published listing disabled");
            None
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Env: `NOOR_ENDPOINT`, refined by `NOOR_SUBMIT_ENDPOINT`,
    /// `NOOR_FETCH_ENDPOINT` and `NOOR_FETCH_PUBLISHED_ENDPOINT`.
    pub endpoints: RemoteEndpoints,

    /// Location of the SQLite file.
    /// Env: `NOOR_DB_PATH`
    /// Default: the platform data directory.
    pub db_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // empty values count as unset
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(endpoint) = var("NOOR_ENDPOINT") {
            config.endpoints = RemoteEndpoints::single(&endpoint);
        }
        if let Some(url) = var("NOOR_SUBMIT_ENDPOINT") {
            config.endpoints.submit = Some(url);
        }
        if let Some(url) = var("NOOR_FETCH_ENDPOINT") {
            config.endpoints.fetch_all = Some(url);
        }
        if let Some(url) = var("NOOR_FETCH_PUBLISHED_ENDPOINT") {
            config.endpoints.fetch_published = Some(url);
        }
        if let Some(path) = var("NOOR_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_is_offline() {
        let config = config_from(&[]);
        assert!(config.endpoints.is_empty());
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_single_endpoint_derives_published() {
        let config = config_from(&[("NOOR_ENDPOINT", "https://example.org/exec")]);
        assert_eq!(
            config.endpoints.submit.as_deref(),
            Some("https://example.org/exec")
        );
        assert_eq!(
            config.endpoints.fetch_all.as_deref(),
            Some("https://example.org/exec")
        );
        assert_eq!(
            config.endpoints.fetch_published.as_deref(),
            Some("https://example.org/exec?published=true")
        );
    }

    #[test]
    fn test_published_keeps_existing_query() {
        let endpoints = RemoteEndpoints::single("https://example.org/exec?sheet=a");
        assert_eq!(
            endpoints.fetch_published.as_deref(),
            Some("https://example.org/exec?sheet=a&published=true")
        );
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let config = config_from(&[
            ("NOOR_ENDPOINT", "https://example.org/exec"),
            ("NOOR_SUBMIT_ENDPOINT", "https://example.org/submit"),
            ("NOOR_FETCH_ENDPOINT", "   "),
            ("NOOR_DB_PATH", "/tmp/noor.db"),
        ]);
        assert_eq!(
            config.endpoints.submit.as_deref(),
            Some("https://example.org/submit")
        );
        assert_eq!(
            config.endpoints.fetch_all.as_deref(),
            Some("https://example.org/exec")
        );
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/noor.db")));
    }

    #[test]
    fn test_invalid_url_disables_published_only() {
        let endpoints = RemoteEndpoints::single("not a url");
        assert_eq!(endpoints.submit.as_deref(), Some("not a url"));
        assert!(endpoints.fetch_published.is_none());
    }
}
