//! Core data types for the workflow-folders pipeline.
//!
//! These types flow between the config fetcher, the workflow source and the
//! grouping engine. They are plain data: all mutation happens in the units
//! that produce them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Two-part identifier of a hosted repository (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/name` string.
    ///
    /// Returns `None` unless the input is exactly two non-empty segments
    /// separated by a single `/`.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input.splitn(2, '/');
        let owner = parts.next()?.trim();
        let name = parts.next()?.trim();
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// Storage key for this repository's cached config.
    pub fn cache_key(&self) -> String {
        format!("config_{}_{}", self.owner, self.name)
    }

    /// Storage key for per-repository settings (enable flag, folder state).
    pub fn settings_key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// One workflow known to the remote system.
///
/// `filename` is derived from the trailing segment of `path` and is the
/// join key used by the grouping engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDescriptor {
    /// Display name (e.g. "CI").
    pub name: String,
    /// Definition path within the repository (e.g. `.github/workflows/ci.yml`).
    pub path: String,
    /// Last path segment of `path` (e.g. `ci.yml`).
    pub filename: String,
}

impl WorkflowDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let filename = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            name: name.into(),
            path,
            filename,
        }
    }
}

/// One user-declared folder: a display label and the workflow filenames it
/// claims. Filenames are case-sensitive bare names (`ci.yml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDefinition {
    pub name: String,
    #[serde(default)]
    pub workflows: Vec<String>,
}

/// The fetched folder configuration document.
///
/// Shape on the wire: `{"folders": [{"name": "...", "workflows": ["..."]}]}`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    #[serde(default)]
    pub folders: Vec<FolderDefinition>,
}

impl FolderConfig {
    /// Parse a config document from raw JSON text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Filenames listed in more than one folder.
    ///
    /// The grouping engine resolves these collisions later-folder-wins; this
    /// exists so the fetcher can surface the duplicate listing as a
    /// diagnostic instead of silently reordering workflows.
    pub fn duplicate_filenames(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for folder in &self.folders {
            for filename in &folder.workflows {
                if !seen.insert(filename.as_str()) && !duplicates.contains(filename) {
                    duplicates.push(filename.clone());
                }
            }
        }
        duplicates
    }
}

/// How much a workflow listing can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTrust {
    /// Produced by the metadata API.
    Authoritative,
    /// Scraped from a rendered page; possibly incomplete.
    BestEffort,
}

/// A workflow listing tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowListing {
    pub workflows: Vec<WorkflowDescriptor>,
    pub trust: SourceTrust,
}

impl WorkflowListing {
    pub fn authoritative(workflows: Vec<WorkflowDescriptor>) -> Self {
        Self {
            workflows,
            trust: SourceTrust::Authoritative,
        }
    }

    pub fn best_effort(workflows: Vec<WorkflowDescriptor>) -> Self {
        Self {
            workflows,
            trust: SourceTrust::BestEffort,
        }
    }
}

/// One named folder in a grouping result, holding the descriptors that
/// matched it in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderBucket {
    pub name: String,
    pub workflows: Vec<WorkflowDescriptor>,
}

/// Output of the grouping engine.
///
/// Every input descriptor appears in exactly one place: either one folder's
/// bucket or `uncategorized`. Folders keep config declaration order; empty
/// folders are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedWorkflows {
    pub folders: Vec<FolderBucket>,
    pub uncategorized: Vec<WorkflowDescriptor>,
}

impl GroupedWorkflows {
    /// Total number of descriptors across all buckets.
    pub fn len(&self) -> usize {
        self.folders.iter().map(|f| f.workflows.len()).sum::<usize>() + self.uncategorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
