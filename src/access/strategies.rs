//! The individual write-access detection strategies.

use async_trait::async_trait;

use crate::access::{AccessStrategy, ProbeOutcome};
use crate::github::GithubClient;
use crate::models::RepoId;
use crate::scrape;

/// Permission levels treated as write access.
const WRITE_LEVELS: [&str; 3] = ["admin", "write", "maintain"];

/// Permission levels treated as definitive non-write access.
const READ_LEVELS: [&str; 3] = ["read", "triage", "none"];

/// Strategy 1: ask the metadata API for the viewer's permission level.
///
/// Requires a configured token and a known viewer identity. Definitive in
/// both directions when the endpoint answers with a known level.
pub struct ApiPermissionProbe {
    client: GithubClient,
    viewer: String,
}

impl ApiPermissionProbe {
    pub fn new(client: GithubClient, viewer: String) -> Self {
        Self { client, viewer }
    }
}

#[async_trait]
impl AccessStrategy for ApiPermissionProbe {
    fn name(&self) -> &'static str {
        "api-permission"
    }

    async fn attempt(&self, repo: &RepoId) -> ProbeOutcome {
        match self.client.collaborator_permission(repo, &self.viewer).await {
            Ok(level) if WRITE_LEVELS.contains(&level.as_str()) => ProbeOutcome::Grant,
            Ok(level) if READ_LEVELS.contains(&level.as_str()) => ProbeOutcome::Deny,
            Ok(level) => {
                tracing::debug!(%level, "unknown permission level");
                ProbeOutcome::Inconclusive
            }
            Err(e) => {
                tracing::debug!("permission endpoint unavailable: {}", e);
                ProbeOutcome::Inconclusive
            }
        }
    }
}

/// Strategy 2: header-only request against the repository settings page.
///
/// The host serves that page only to viewers with write access; everyone
/// else gets redirected or refused. Redirects are not followed, so a 3xx
/// status is observable.
pub struct SettingsPageProbe {
    client: GithubClient,
}

impl SettingsPageProbe {
    pub fn new(client: GithubClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccessStrategy for SettingsPageProbe {
    fn name(&self) -> &'static str {
        "settings-page"
    }

    async fn attempt(&self, repo: &RepoId) -> ProbeOutcome {
        match self.client.settings_probe(repo).await {
            Ok(status) if (200..300).contains(&status) => ProbeOutcome::Grant,
            Ok(status) if (300..400).contains(&status) || status == 403 || status == 404 => {
                ProbeOutcome::Deny
            }
            Ok(status) => {
                tracing::debug!(status, "unexpected settings probe status");
                ProbeOutcome::Inconclusive
            }
            Err(e) => {
                tracing::debug!("settings probe failed: {}", e);
                ProbeOutcome::Inconclusive
            }
        }
    }
}

/// Strategy 3: look for privileged-viewer affordances in the page markup.
///
/// Weakest signal of the three. A logged-out page short-circuits to deny;
/// otherwise presence of a settings affordance decides. May produce false
/// negatives (affordance hidden) or false positives (markup drift).
pub struct MarkupHeuristicProbe {
    page_html: Option<String>,
}

impl MarkupHeuristicProbe {
    pub fn new(page_html: Option<String>) -> Self {
        Self { page_html }
    }
}

#[async_trait]
impl AccessStrategy for MarkupHeuristicProbe {
    fn name(&self) -> &'static str {
        "page-markup"
    }

    async fn attempt(&self, repo: &RepoId) -> ProbeOutcome {
        let html = match self.page_html.as_deref() {
            Some(html) => html,
            None => return ProbeOutcome::Inconclusive,
        };

        if !scrape::is_logged_in(html) {
            return ProbeOutcome::Deny;
        }

        if scrape::has_admin_affordance(html, repo) {
            ProbeOutcome::Grant
        } else {
            ProbeOutcome::Deny
        }
    }
}
