//! Time-boxed cache for fetched folder configs.
//!
//! Keyed by repository, one entry per repo, valid for five minutes from the
//! fetch timestamp. Timestamps are epoch milliseconds rather than process
//! instants so the whole table can round-trip through the on-disk store and
//! stay meaningful across runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::models::{FolderConfig, RepoId};

/// Cache validity window: 5 minutes.
pub const CONFIG_TTL_MS: i64 = 5 * 60 * 1000;

/// The cache file name, under the app data directory.
const CACHE_FILE: &str = "config-cache.json";

/// The app data directory name.
const DATA_DIR: &str = ".wfold";

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One cached config with its fetch timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub config: FolderConfig,
    pub fetched_at_ms: i64,
}

impl CacheEntry {
    /// An entry is fresh while less than the TTL has elapsed since fetch.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms - self.fetched_at_ms < CONFIG_TTL_MS
    }
}

/// In-memory cache table, keyed by repository cache key.
///
/// Owned by the config fetcher; writes are last-writer-wins with no
/// locking. At most one fetch per repository is normally in flight, and a
/// lost race costs one redundant network call, not corruption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigCache {
    entries: HashMap<String, CacheEntry>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fresh config for the repository.
    ///
    /// Expired entries are treated as absent (they are overwritten by the
    /// next successful fetch rather than eagerly removed).
    pub fn get(&self, repo: &RepoId) -> Option<FolderConfig> {
        let entry = self.entries.get(&repo.cache_key())?;
        if entry.is_fresh(now_ms()) {
            Some(entry.config.clone())
        } else {
            None
        }
    }

    /// Store a config fetched just now, overwriting any previous entry.
    pub fn insert(&mut self, repo: &RepoId, config: FolderConfig) {
        self.insert_at(repo, config, now_ms());
    }

    /// Store a config with an explicit fetch timestamp.
    pub fn insert_at(&mut self, repo: &RepoId, config: FolderConfig, fetched_at_ms: i64) {
        self.entries.insert(
            repo.cache_key(),
            CacheEntry {
                config,
                fetched_at_ms,
            },
        );
    }

    /// Drop the entry for one repository.
    pub fn remove(&mut self, repo: &RepoId) {
        self.entries.remove(&repo.cache_key());
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File-backed persistence for the config cache.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store at the default location (`~/.wfold/config-cache.json`).
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(DATA_DIR).join(CACHE_FILE),
        })
    }

    /// Create a store at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the cache from disk.
    ///
    /// Returns an empty cache if the file doesn't exist or can't be read.
    pub fn load(&self) -> ConfigCache {
        if !self.path.exists() {
            return ConfigCache::default();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return ConfigCache::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(cache) => cache,
            Err(_) => ConfigCache::default(),
        }
    }

    /// Save the cache to disk, creating the parent directory if needed.
    ///
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, cache: &ConfigCache) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer(&mut writer, cache).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }

    /// Remove the cache file entirely (bulk wipe).
    pub fn clear(&self) -> bool {
        if self.path.exists() {
            fs::remove_file(&self.path).is_ok()
        } else {
            true
        }
    }
}
