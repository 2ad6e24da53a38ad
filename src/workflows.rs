//! Workflow listing retrieval: API primary, rendered-page scrape fallback.

use std::sync::Mutex;
use thiserror::Error;

use crate::github::GithubClient;
use crate::models::{RepoId, WorkflowListing};
use crate::scrape;

/// Error type for workflow retrieval.
///
/// Returned only when the fallback itself fails; an empty scraped listing
/// is a success, not an error.
#[derive(Debug, Error)]
pub enum WorkflowFetchError {
    #[error("workflow listing unavailable: {0}")]
    Unavailable(String),
}

/// Retrieves workflow listings, preferring the metadata API and degrading
/// to page scraping.
///
/// The result is tagged with its provenance ([`crate::models::SourceTrust`])
/// so callers can tell an authoritative listing from a best-effort one.
#[derive(Debug)]
pub struct WorkflowSource {
    client: GithubClient,
    /// Last quota reading from the API, for the caller to persist.
    last_rate_remaining: Mutex<Option<u32>>,
}

impl WorkflowSource {
    pub fn new(client: GithubClient) -> Self {
        Self {
            client,
            last_rate_remaining: Mutex::new(None),
        }
    }

    /// Fetch the repository's workflow listing.
    ///
    /// Any primary-path failure (non-success status, transport error,
    /// unexpected body shape) silently switches to the scrape fallback.
    pub async fn fetch(&self, repo: &RepoId) -> Result<WorkflowListing, WorkflowFetchError> {
        match self.client.list_workflows(repo).await {
            Ok(page) => {
                if let Some(remaining) = page.rate_remaining {
                    *self.last_rate_remaining.lock().unwrap() = Some(remaining);
                }
                Ok(WorkflowListing::authoritative(page.workflows))
            }
            Err(e) => {
                tracing::debug!(%repo, "workflow API unavailable ({}), scraping page", e);
                self.fetch_from_page(repo).await
            }
        }
    }

    /// Scrape the rendered actions page for workflow links.
    ///
    /// Strictly best-effort: returns whatever the page yields, possibly an
    /// empty listing.
    async fn fetch_from_page(&self, repo: &RepoId) -> Result<WorkflowListing, WorkflowFetchError> {
        let response = self
            .client
            .actions_page(repo)
            .await
            .map_err(|e| WorkflowFetchError::Unavailable(e.to_string()))?;

        if !response.is_success() {
            return Err(WorkflowFetchError::Unavailable(format!(
                "actions page returned status {}",
                response.status
            )));
        }

        let html = response
            .text()
            .map_err(|e| WorkflowFetchError::Unavailable(e.to_string()))?;

        if scrape::is_truncated(&html) {
            tracing::debug!(%repo, "actions page is paginated; scraped listing may be incomplete");
        }

        Ok(WorkflowListing::best_effort(scrape::extract_workflows(
            &html, repo,
        )))
    }

    /// The most recent remaining-quota reading, if the API was reached.
    pub fn last_rate_limit(&self) -> Option<u32> {
        *self.last_rate_remaining.lock().unwrap()
    }
}
