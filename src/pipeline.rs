//! Orchestration of the full pipeline: fetch config and workflows
//! concurrently, group, and degrade gracefully.
//!
//! This is the error boundary from the crate's degradation policy: no unit
//! failure escapes as a hard error. The worst outcome is
//! [`OrganizeOutcome::Unavailable`], which presents the original,
//! unmodified listing upstream.

use crate::access::AccessProber;
use crate::config::{ConfigCache, ConfigFetcher, ConfigOrigin};
use crate::github::GithubClient;
use crate::grouping::group;
use crate::models::{GroupedWorkflows, RepoId, SourceTrust, WorkflowListing};
use crate::workflows::WorkflowSource;

/// Result of organizing one repository's workflow list.
#[derive(Debug)]
pub enum OrganizeOutcome {
    /// A config was found and applied.
    Organized {
        grouped: GroupedWorkflows,
        trust: SourceTrust,
        origin: ConfigOrigin,
    },
    /// Workflows were retrieved but the repository has no config. The flag
    /// reports whether the viewer could create one.
    Unconfigured {
        listing: WorkflowListing,
        can_create_config: bool,
    },
    /// No workflow data could be retrieved at all.
    Unavailable,
}

/// Owns the pipeline units and runs them for one repository at a time.
pub struct Organizer {
    fetcher: ConfigFetcher,
    source: WorkflowSource,
    client: GithubClient,
}

impl Organizer {
    /// Build an organizer around a client, seeding the config cache from a
    /// previously persisted table.
    pub fn new(client: GithubClient, cache: ConfigCache) -> Self {
        Self {
            fetcher: ConfigFetcher::with_cache(client.clone(), cache),
            source: WorkflowSource::new(client.clone()),
            client,
        }
    }

    /// Run the pipeline for a repository.
    ///
    /// Config and workflow retrieval are fired together and awaited
    /// together; the grouping engine needs both, so no ordering between
    /// them matters. The access probe runs only on the no-config path.
    pub async fn organize(&mut self, repo: &RepoId) -> OrganizeOutcome {
        let Self {
            fetcher,
            source,
            client,
        } = self;

        let (config_result, listing_result) =
            tokio::join!(fetcher.fetch(repo), source.fetch(repo));

        let listing = match listing_result {
            Ok(listing) => listing,
            Err(e) => {
                tracing::debug!(%repo, "no workflow data available: {}", e);
                return OrganizeOutcome::Unavailable;
            }
        };

        match config_result {
            Ok(fetched) => OrganizeOutcome::Organized {
                grouped: group(&fetched.config, &listing.workflows),
                trust: listing.trust,
                origin: fetched.origin,
            },
            Err(e) => {
                tracing::debug!(%repo, "no folder config: {}", e);
                let can_create_config = Self::probe_write_access(client, repo).await;
                OrganizeOutcome::Unconfigured {
                    listing,
                    can_create_config,
                }
            }
        }
    }

    /// Fetch the rendered page (best-effort) and run the access chain.
    async fn probe_write_access(client: &GithubClient, repo: &RepoId) -> bool {
        let page_html = match client.actions_page(repo).await {
            Ok(response) if response.is_success() => response.text().ok(),
            _ => None,
        };
        AccessProber::new(client.clone(), page_html)
            .check_write_access(repo)
            .await
    }

    /// The fetcher's current cache, for persistence after a run.
    pub fn cache(&self) -> &ConfigCache {
        self.fetcher.cache()
    }

    /// Last remaining-quota reading from the workflow API, if any.
    pub fn last_rate_limit(&self) -> Option<u32> {
        self.source.last_rate_limit()
    }
}
