//! Best-effort extraction of workflow data from rendered page HTML.
//!
//! Used when the metadata API is unavailable (private repository, missing
//! token, exhausted quota): the workflow list and the viewer's identity are
//! read out of the markup the host already rendered. Everything here is
//! heuristic by nature; markup changes degrade results, they never error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{RepoId, WorkflowDescriptor};

/// Marker for a paginated listing. Its presence means the page shows only
/// a prefix of the repository's workflows.
const SHOW_MORE_MARKER: &str = "Show more workflows";

/// The host embeds the logged-in viewer's handle as page metadata.
static VIEWER_LOGIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<meta\s+name="user-login"\s+content="([^"]*)""#)
        .expect("Invalid viewer login regex")
});

/// Extract the logged-in viewer's handle from page metadata.
///
/// Returns `None` when the marker is absent or empty (logged-out view).
pub fn viewer_login(html: &str) -> Option<String> {
    let login = VIEWER_LOGIN_RE.captures(html)?.get(1)?.as_str().trim();
    if login.is_empty() {
        None
    } else {
        Some(login.to_string())
    }
}

/// Whether the page carries a logged-in indicator at all.
pub fn is_logged_in(html: &str) -> bool {
    viewer_login(html).is_some()
}

/// Whether the listing is paginated (a "show more" affordance is present),
/// meaning the extracted workflows may be a truncated prefix.
pub fn is_truncated(html: &str) -> bool {
    html.contains(SHOW_MORE_MARKER)
}

/// Extract workflow descriptors from the rendered actions page.
///
/// Matches anchors of the form
/// `href="/{owner}/{name}/actions/workflows/<file>"` and takes the anchor
/// text as the display name. Duplicate filenames (the page links each
/// workflow more than once) are collapsed to their first occurrence,
/// preserving page order.
pub fn extract_workflows(html: &str, repo: &RepoId) -> Vec<WorkflowDescriptor> {
    let pattern = format!(
        r#"href="/{}/{}/actions/workflows/([^"?#]+)[^"]*"[^>]*>\s*([^<]+?)\s*<"#,
        regex::escape(&repo.owner),
        regex::escape(&repo.name)
    );
    let link_re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!("workflow link pattern failed to compile: {}", e);
            return Vec::new();
        }
    };

    let mut seen = std::collections::HashSet::new();
    let mut workflows = Vec::new();
    for captures in link_re.captures_iter(html) {
        let raw_file = &captures[1];
        let filename = urlencoding::decode(raw_file)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| raw_file.to_string());
        if !seen.insert(filename.clone()) {
            continue;
        }
        let name = captures[2].trim().to_string();
        let path = format!(".github/workflows/{}", filename);
        workflows.push(WorkflowDescriptor::new(name, path));
    }
    workflows
}

/// Whether the page shows an affordance only rendered for privileged
/// viewers: the repository settings tab, or the `g s` settings hotkey
/// binding.
pub fn has_admin_affordance(html: &str, repo: &RepoId) -> bool {
    let settings_href = format!(r#"href="/{}/{}/settings""#, repo.owner, repo.name);
    html.contains(&settings_href) || html.contains(r#"data-hotkey="g s""#)
}
