//! Cache and per-repository settings commands.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::config::CacheStore;
use crate::models::RepoId;
use crate::settings::SettingsStore;

/// Wipe every cached folder config.
pub fn handle_cache_clear() -> Result<()> {
    let store = CacheStore::new().ok_or_else(|| eyre!("could not determine home directory"))?;
    let count = store.load().len();
    if store.clear() {
        println!("Removed {} cached config(s).", count);
        Ok(())
    } else {
        Err(eyre!("failed to remove {}", store.path().display()))
    }
}

/// Turn folder organization on or off for one repository.
pub fn handle_set_enabled(repo: &str, enabled: bool) -> Result<()> {
    let repo = RepoId::parse(repo)
        .ok_or_else(|| eyre!("expected <owner>/<name>, got: {}", repo))?;
    let store = SettingsStore::new().ok_or_else(|| eyre!("could not determine home directory"))?;

    let mut settings = store.load();
    settings.set_enabled(&repo, enabled);
    if !store.save(&settings) {
        return Err(eyre!("failed to write {}", store.settings_path().display()));
    }

    if enabled {
        println!("Folder organization enabled for {}.", repo);
    } else {
        println!("Folder organization disabled for {}.", repo);
    }
    Ok(())
}
