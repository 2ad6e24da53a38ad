//! Best-effort detection of whether the viewer can write to a repository.
//!
//! Three strategies run in order (API permission lookup, settings-page
//! probe, page-markup heuristic), each behind the common
//! [`AccessStrategy`] contract. The chain stops at the first conclusive
//! outcome. This is advisory UI gating only, never a security boundary:
//! markup changes can produce false results in either direction.

mod strategies;

pub use strategies::{ApiPermissionProbe, MarkupHeuristicProbe, SettingsPageProbe};

use async_trait::async_trait;

use crate::github::GithubClient;
use crate::models::RepoId;
use crate::scrape;

/// Outcome of one probe strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The viewer has write access.
    Grant,
    /// The viewer does not have write access.
    Deny,
    /// This strategy cannot tell; ask the next one.
    Inconclusive,
}

impl ProbeOutcome {
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, ProbeOutcome::Inconclusive)
    }
}

/// One write-access detection strategy.
///
/// Implementations never fail outward: internal errors degrade to
/// [`ProbeOutcome::Inconclusive`].
#[async_trait]
pub trait AccessStrategy: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    async fn attempt(&self, repo: &RepoId) -> ProbeOutcome;
}

/// Ordered chain of access strategies.
pub struct AccessProber {
    strategies: Vec<Box<dyn AccessStrategy>>,
}

impl AccessProber {
    /// Build the standard chain for a repository page.
    ///
    /// `page_html` is the rendered page the viewer is looking at, when
    /// available. The viewer's identity is read from its metadata; without
    /// an identity the network strategies are skipped entirely and only the
    /// markup heuristic runs. The API strategy additionally requires a
    /// configured token.
    pub fn new(client: GithubClient, page_html: Option<String>) -> Self {
        let viewer = page_html.as_deref().and_then(scrape::viewer_login);

        let mut strategies: Vec<Box<dyn AccessStrategy>> = Vec::new();
        if let Some(viewer) = viewer {
            if client.has_token() {
                strategies.push(Box::new(ApiPermissionProbe::new(client.clone(), viewer)));
            }
            strategies.push(Box::new(SettingsPageProbe::new(client)));
        }
        strategies.push(Box::new(MarkupHeuristicProbe::new(page_html)));

        Self { strategies }
    }

    /// Build a chain from explicit strategies (tests).
    pub fn with_strategies(strategies: Vec<Box<dyn AccessStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain. The first conclusive outcome decides; a fully
    /// inconclusive chain means `false`.
    pub async fn check_write_access(&self, repo: &RepoId) -> bool {
        for strategy in &self.strategies {
            match strategy.attempt(repo).await {
                ProbeOutcome::Grant => {
                    tracing::debug!(%repo, strategy = strategy.name(), "write access granted");
                    return true;
                }
                ProbeOutcome::Deny => {
                    tracing::debug!(%repo, strategy = strategy.name(), "write access denied");
                    return false;
                }
                ProbeOutcome::Inconclusive => {
                    tracing::debug!(%repo, strategy = strategy.name(), "probe inconclusive");
                }
            }
        }
        false
    }
}
