//! Persisted user settings.
//!
//! Per-repository enable flags, per-folder expanded/collapsed state, and
//! the last observed API quota live in `~/.wfold/settings.json`. Defaults
//! are deliberately permissive: an unknown repository is enabled and an
//! unknown folder is expanded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::models::RepoId;

/// The settings directory name.
const SETTINGS_DIR: &str = ".wfold";

/// The settings file name.
const SETTINGS_FILE: &str = "settings.json";

/// User settings, keyed by repository where applicable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Per-repository enable flag. Absent means enabled.
    #[serde(default)]
    pub enabled: HashMap<String, bool>,
    /// Per-repository, per-folder expanded flag. Absent means expanded.
    #[serde(default)]
    pub expanded: HashMap<String, HashMap<String, bool>>,
    /// Last observed remaining API quota.
    #[serde(default)]
    pub rate_limit_remaining: Option<u32>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether folder organization is enabled for the repository.
    pub fn is_enabled(&self, repo: &RepoId) -> bool {
        self.enabled
            .get(&repo.settings_key())
            .copied()
            .unwrap_or(true)
    }

    pub fn set_enabled(&mut self, repo: &RepoId, enabled: bool) {
        self.enabled.insert(repo.settings_key(), enabled);
    }

    /// Whether a folder is expanded in the repository's view.
    pub fn is_expanded(&self, repo: &RepoId, folder: &str) -> bool {
        self.expanded
            .get(&repo.settings_key())
            .and_then(|folders| folders.get(folder))
            .copied()
            .unwrap_or(true)
    }

    pub fn set_expanded(&mut self, repo: &RepoId, folder: &str, expanded: bool) {
        self.expanded
            .entry(repo.settings_key())
            .or_default()
            .insert(folder.to_string(), expanded);
    }
}

/// Manages settings storage and retrieval.
#[derive(Debug)]
pub struct SettingsStore {
    settings_path: PathBuf,
}

impl SettingsStore {
    /// Create a store at the default location (`~/.wfold/settings.json`).
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            settings_path: home.join(SETTINGS_DIR).join(SETTINGS_FILE),
        })
    }

    /// Create a store against an explicit path.
    pub fn with_path(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings, defaulting when the file is absent or unreadable.
    pub fn load(&self) -> Settings {
        if !self.settings_path.exists() {
            return Settings::default();
        }

        let file = match File::open(&self.settings_path) {
            Ok(f) => f,
            Err(_) => return Settings::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(settings) => settings,
            Err(_) => Settings::default(),
        }
    }

    /// Save settings, creating the parent directory if needed.
    ///
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, settings: &Settings) -> bool {
        if let Some(parent) = self.settings_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.settings_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, settings).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoId {
        RepoId::new("octo", "demo")
    }

    #[test]
    fn test_defaults_are_permissive() {
        let settings = Settings::new();
        assert!(settings.is_enabled(&repo()));
        assert!(settings.is_expanded(&repo(), "Build"));
    }

    #[test]
    fn test_set_enabled() {
        let mut settings = Settings::new();
        settings.set_enabled(&repo(), false);
        assert!(!settings.is_enabled(&repo()));
        // Other repositories are unaffected.
        assert!(settings.is_enabled(&RepoId::new("octo", "other")));

        settings.set_enabled(&repo(), true);
        assert!(settings.is_enabled(&repo()));
    }

    #[test]
    fn test_set_expanded_is_per_repo_and_folder() {
        let mut settings = Settings::new();
        settings.set_expanded(&repo(), "Build", false);

        assert!(!settings.is_expanded(&repo(), "Build"));
        assert!(settings.is_expanded(&repo(), "Deploy"));
        assert!(settings.is_expanded(&RepoId::new("octo", "other"), "Build"));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("settings.json"));
        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join(".wfold").join("settings.json"));

        let mut settings = Settings::new();
        settings.set_enabled(&repo(), false);
        settings.set_expanded(&repo(), "Build", false);
        settings.rate_limit_remaining = Some(57);

        assert!(store.save(&settings));
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{broken").unwrap();

        let store = SettingsStore::with_path(path);
        assert_eq!(store.load(), Settings::default());
    }
}
