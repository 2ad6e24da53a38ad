//! Client for the hosting service's HTTP surfaces.
//!
//! Three distinct hosts are involved: the metadata API (workflow listings,
//! collaborator permissions), the raw content host (the folder config file
//! in a repository's source tree), and the rendered web pages (scrape
//! fallback, settings probe). All three base URLs are injectable so tests
//! can point them at a local mock server.

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::adapters::ReqwestHttpClient;
use crate::models::{RepoId, WorkflowDescriptor};
use crate::ratelimit;
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Default URL for the metadata API.
pub const API_BASE: &str = "https://api.github.com";

/// Default URL for the raw content host.
pub const RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Default URL for rendered pages.
pub const WEB_BASE: &str = "https://github.com";

/// In-repository path of the folder config document.
pub const CONFIG_PATH: &str = ".github/workflow-folders.json";

/// Error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Status { status: u16 },

    /// The response body did not have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Wire shape of the workflow listing endpoint.
#[derive(Debug, Deserialize)]
struct WorkflowsResponse {
    #[serde(default)]
    workflows: Vec<ApiWorkflow>,
}

#[derive(Debug, Deserialize)]
struct ApiWorkflow {
    name: String,
    path: String,
}

/// A decoded workflow listing plus the quota headers that rode along.
#[derive(Debug, Clone)]
pub struct WorkflowPage {
    pub workflows: Vec<WorkflowDescriptor>,
    /// Remaining request quota reported by the server, if present.
    pub rate_remaining: Option<u32>,
}

/// Client for the hosting service.
///
/// Cheap to clone; the underlying HTTP clients are shared.
#[derive(Clone)]
pub struct GithubClient {
    http: Arc<dyn HttpClient>,
    /// Redirect-disabled client for the settings-page probe.
    probe_http: Arc<dyn HttpClient>,
    api_base: String,
    raw_base: String,
    web_base: String,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client against the production hosts.
    pub fn new() -> Self {
        Self {
            http: Arc::new(ReqwestHttpClient::new()),
            probe_http: Arc::new(ReqwestHttpClient::no_redirect()),
            api_base: API_BASE.to_string(),
            raw_base: RAW_BASE.to_string(),
            web_base: WEB_BASE.to_string(),
            token: None,
        }
    }

    /// Create a client with injected HTTP implementations.
    ///
    /// `probe_http` is used only for the header-only settings probe and must
    /// not follow redirects.
    pub fn with_http(http: Arc<dyn HttpClient>, probe_http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            probe_http,
            api_base: API_BASE.to_string(),
            raw_base: RAW_BASE.to_string(),
            web_base: WEB_BASE.to_string(),
            token: None,
        }
    }

    /// Override all three base URLs (wiremock tests).
    pub fn with_base_urls(
        mut self,
        api_base: impl Into<String>,
        raw_base: impl Into<String>,
        web_base: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.raw_base = raw_base.into();
        self.web_base = web_base.into();
        self
    }

    /// Set the bearer token used for API calls.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Whether a bearer token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn web_base(&self) -> &str {
        &self.web_base
    }

    /// Headers for metadata API calls.
    fn api_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Accept".to_string(),
            "application/vnd.github+json".to_string(),
        );
        if let Some(ref token) = self.token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn decode<T: serde::de::DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// List the repository's workflows.
    ///
    /// GET /repos/{owner}/{repo}/actions/workflows
    ///
    /// Quota headers are observed on every response, success or not, so a
    /// rate-limited failure still produces the low-water warning.
    pub async fn list_workflows(&self, repo: &RepoId) -> Result<WorkflowPage, ApiError> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows?per_page=100",
            self.api_base, repo.owner, repo.name
        );
        let response = self.http.get(&url, &self.api_headers()).await?;

        let rate_remaining = ratelimit::observe(&response);

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        let decoded: WorkflowsResponse = Self::decode(&response)?;
        let workflows = decoded
            .workflows
            .into_iter()
            .map(|w| WorkflowDescriptor::new(w.name, w.path))
            .collect();

        Ok(WorkflowPage {
            workflows,
            rate_remaining,
        })
    }

    /// Fetch the viewer's permission level on the repository.
    ///
    /// GET /repos/{owner}/{repo}/collaborators/{login}/permission
    ///
    /// Returns the permission string (`admin`, `write`, `read`, ...).
    pub async fn collaborator_permission(
        &self,
        repo: &RepoId,
        login: &str,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/repos/{}/{}/collaborators/{}/permission",
            self.api_base,
            repo.owner,
            repo.name,
            urlencoding::encode(login)
        );
        let response = self.http.get(&url, &self.api_headers()).await?;

        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
            });
        }

        #[derive(Deserialize)]
        struct PermissionResponse {
            permission: String,
        }

        let decoded: PermissionResponse = Self::decode(&response)?;
        Ok(decoded.permission)
    }

    /// Fetch the folder config document from a branch of the raw content
    /// host. The raw `Response` comes back so the caller can distinguish a
    /// definitive miss (404) from a transport failure.
    pub async fn raw_config(&self, repo: &RepoId, branch: &str) -> Result<Response, HttpError> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, repo.owner, repo.name, branch, CONFIG_PATH
        );
        self.http.get(&url, &Headers::new()).await
    }

    /// Fetch the rendered actions page for the repository.
    pub async fn actions_page(&self, repo: &RepoId) -> Result<Response, HttpError> {
        let url = format!("{}/{}/{}/actions", self.web_base, repo.owner, repo.name);
        self.http.get(&url, &Headers::new()).await
    }

    /// Header-only request against the repository settings page, without
    /// following redirects. Returns the raw status code.
    pub async fn settings_probe(&self, repo: &RepoId) -> Result<u16, HttpError> {
        let url = format!("{}/{}/{}/settings", self.web_base, repo.owner, repo.name);
        let response = self.probe_http.head(&url, &Headers::new()).await?;
        Ok(response.status)
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base)
            .field("raw_base", &self.raw_base)
            .field("web_base", &self.web_base)
            .field("token", &self.token.as_ref().map(|_| "<set>"))
            .finish()
    }
}
