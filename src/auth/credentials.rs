//! Credentials storage and management.
//!
//! This module provides functionality for storing and loading the optional
//! API token from `~/.wfold/.credentials.json`. The token is only ever
//! attached as a bearer credential to metadata API calls; everything works
//! without one, at lower fidelity (scrape fallback, weaker access probing).

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".wfold";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Stored authentication state: a single optional API token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Personal access token for the metadata API.
    pub token: Option<String>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a token is configured.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Manages credential storage and retrieval.
#[derive(Debug)]
pub struct CredentialsManager {
    /// Path to the credentials file.
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a new CredentialsManager.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        let credentials_path = home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE);
        Some(Self { credentials_path })
    }

    /// Create a manager against an explicit path.
    pub fn with_path(credentials_path: PathBuf) -> Self {
        Self { credentials_path }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &PathBuf {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// Returns default credentials if the file doesn't exist or can't be read.
    pub fn load(&self) -> Credentials {
        if !self.credentials_path.exists() {
            return Credentials::default();
        }

        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(creds) => creds,
            Err(_) => Credentials::default(),
        }
    }

    /// Save credentials to the credentials file.
    ///
    /// Creates the parent directory if it doesn't exist.
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, credentials: &Credentials) -> bool {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, credentials).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }

    /// Remove the stored credentials entirely.
    ///
    /// Returns `true` if nothing is stored afterwards.
    pub fn clear(&self) -> bool {
        if self.credentials_path.exists() {
            fs::remove_file(&self.credentials_path).is_ok()
        } else {
            true
        }
    }
}
