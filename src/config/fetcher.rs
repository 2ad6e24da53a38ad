//! Fetches the folder config document, trying branches in priority order.

use thiserror::Error;

use crate::config::cache::ConfigCache;
use crate::github::GithubClient;
use crate::models::{FolderConfig, RepoId};

/// Branch names tried in order when fetching the config.
pub const CONFIG_BRANCHES: [&str; 2] = ["main", "master"];

/// Where a returned config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Served from the TTL cache; no network call was made.
    Cache,
    /// Freshly fetched from the named branch.
    Branch(String),
}

/// A config plus its origin tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedConfig {
    pub config: FolderConfig,
    pub origin: ConfigOrigin,
}

/// Error type for config fetching.
///
/// Callers treat both variants as "this repository has no config"; neither
/// is a hard failure. The split only records whether any branch answered at
/// all.
#[derive(Debug, Error)]
pub enum ConfigFetchError {
    /// Every branch answered definitively without yielding a config
    /// (missing file or unparseable content).
    #[error("no folder config found on any branch")]
    NotFound,

    /// Every attempt failed in transport; the config's existence is
    /// unknown.
    #[error("network failure fetching folder config: {0}")]
    Network(String),
}

/// Retrieves folder configs with a cache-first, branch-fallback policy.
///
/// Owns the [`ConfigCache`]; exactly one cache write happens per successful
/// fresh fetch, and none on a cache hit or a total miss.
#[derive(Debug)]
pub struct ConfigFetcher {
    client: GithubClient,
    cache: ConfigCache,
}

impl ConfigFetcher {
    pub fn new(client: GithubClient) -> Self {
        Self {
            client,
            cache: ConfigCache::new(),
        }
    }

    /// Create a fetcher seeded with a previously loaded cache.
    pub fn with_cache(client: GithubClient, cache: ConfigCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ConfigCache {
        &mut self.cache
    }

    /// Fetch the folder config for a repository.
    ///
    /// A fresh cache entry short-circuits without any network traffic.
    /// Otherwise branches are tried in [`CONFIG_BRANCHES`] order; the first
    /// 2xx response that parses wins and is written to the cache. A branch
    /// whose response fails to parse counts as that branch failing; no
    /// content repair is attempted.
    pub async fn fetch(&mut self, repo: &RepoId) -> Result<FetchedConfig, ConfigFetchError> {
        if let Some(config) = self.cache.get(repo) {
            tracing::debug!(%repo, "folder config served from cache");
            return Ok(FetchedConfig {
                config,
                origin: ConfigOrigin::Cache,
            });
        }

        let mut saw_definitive_miss = false;
        let mut last_transport_error = String::new();

        for branch in CONFIG_BRANCHES {
            match self.client.raw_config(repo, branch).await {
                Ok(response) if response.is_success() => {
                    let text = match response.text() {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::debug!(%repo, branch, "config body not UTF-8: {}", e);
                            saw_definitive_miss = true;
                            continue;
                        }
                    };
                    match FolderConfig::parse(&text) {
                        Ok(config) => {
                            let duplicates = config.duplicate_filenames();
                            if !duplicates.is_empty() {
                                tracing::warn!(
                                    %repo,
                                    branch,
                                    ?duplicates,
                                    "config lists the same workflow in multiple folders; the last folder wins"
                                );
                            }
                            tracing::debug!(%repo, branch, "folder config fetched");
                            self.cache.insert(repo, config.clone());
                            return Ok(FetchedConfig {
                                config,
                                origin: ConfigOrigin::Branch(branch.to_string()),
                            });
                        }
                        Err(e) => {
                            tracing::debug!(%repo, branch, "config failed to parse: {}", e);
                            saw_definitive_miss = true;
                        }
                    }
                }
                Ok(response) => {
                    tracing::debug!(%repo, branch, status = response.status, "no config on branch");
                    saw_definitive_miss = true;
                }
                Err(e) => {
                    tracing::debug!(%repo, branch, "config fetch failed: {}", e);
                    last_transport_error = e.to_string();
                }
            }
        }

        if saw_definitive_miss {
            Err(ConfigFetchError::NotFound)
        } else {
            Err(ConfigFetchError::Network(last_transport_error))
        }
    }

    /// Consume the fetcher, returning its cache for persistence.
    pub fn into_cache(self) -> ConfigCache {
        self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;
    use std::sync::Arc;

    const CONFIG_JSON: &str = r#"{"folders":[{"name":"Build","workflows":["ci.yml"]}]}"#;

    fn repo() -> RepoId {
        RepoId::new("octo", "demo")
    }

    fn fetcher_with_mock(mock: &MockHttpClient) -> ConfigFetcher {
        let client = GithubClient::with_http(Arc::new(mock.clone()), Arc::new(mock.clone()))
            .with_base_urls("https://api.test", "https://raw.test", "https://web.test");
        ConfigFetcher::new(client)
    }

    fn branch_url(branch: &str) -> String {
        format!(
            "https://raw.test/octo/demo/{}/.github/workflow-folders.json",
            branch
        )
    }

    #[tokio::test]
    async fn test_fetch_from_first_branch() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        let fetched = fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(fetched.origin, ConfigOrigin::Branch("main".to_string()));
        assert_eq!(fetched.config.folders[0].name, "Build");
        // The master branch was never tried.
        assert_eq!(mock.request_count(&branch_url("master")), 0);
    }

    #[tokio::test]
    async fn test_branch_fallback_order() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(404, Bytes::new())),
        );
        mock.set_response(
            &branch_url("master"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        let fetched = fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(fetched.origin, ConfigOrigin::Branch("master".to_string()));
        // Exactly one failed attempt preceded the success.
        assert_eq!(mock.request_count(&branch_url("main")), 1);
        assert_eq!(mock.request_count(&branch_url("master")), 1);
    }

    #[tokio::test]
    async fn test_unparseable_branch_falls_through() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(200, Bytes::from("<html>login page</html>"))),
        );
        mock.set_response(
            &branch_url("master"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        let fetched = fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(fetched.origin, ConfigOrigin::Branch("master".to_string()));
    }

    #[tokio::test]
    async fn test_all_branches_missing_is_not_found() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(404, Bytes::new())));

        let mut fetcher = fetcher_with_mock(&mock);
        let err = fetcher.fetch(&repo()).await.unwrap_err();

        assert!(matches!(err, ConfigFetchError::NotFound));
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_all_branches_transport_failure_is_network() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let mut fetcher = fetcher_with_mock(&mock);
        let err = fetcher.fetch(&repo()).await.unwrap_err();

        assert!(matches!(err, ConfigFetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_cache_hit_makes_no_network_call() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        fetcher.fetch(&repo()).await.unwrap();
        let second = fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(second.origin, ConfigOrigin::Cache);
        // One fetch total: the second call never hit the network.
        assert_eq!(mock.request_count("https://raw.test"), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_refetch() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        let stale = chrono::Utc::now().timestamp_millis() - 6 * 60 * 1000;
        fetcher
            .cache_mut()
            .insert_at(&repo(), FolderConfig::default(), stale);

        let fetched = fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(fetched.origin, ConfigOrigin::Branch("main".to_string()));
        assert_eq!(mock.request_count("https://raw.test"), 1);
    }

    #[tokio::test]
    async fn test_successful_fetch_writes_cache_once() {
        let mock = MockHttpClient::new();
        mock.set_response(
            &branch_url("main"),
            MockResponse::Success(Response::new(200, Bytes::from(CONFIG_JSON))),
        );

        let mut fetcher = fetcher_with_mock(&mock);
        assert!(fetcher.cache().is_empty());

        fetcher.fetch(&repo()).await.unwrap();

        assert_eq!(fetcher.cache().len(), 1);
        assert!(fetcher.cache().get(&repo()).is_some());
    }
}
