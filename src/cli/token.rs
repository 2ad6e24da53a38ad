//! Token management commands.

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::auth::{Credentials, CredentialsManager};

fn manager() -> Result<CredentialsManager> {
    CredentialsManager::new().ok_or_else(|| eyre!("could not determine home directory"))
}

/// Prompt for a token (without echo) and store it.
pub fn handle_token_set() -> Result<()> {
    let manager = manager()?;
    let token = rpassword::prompt_password("API token: ")?;
    let token = token.trim().to_string();

    if token.is_empty() {
        println!("No token entered; nothing stored.");
        return Ok(());
    }

    let credentials = Credentials { token: Some(token) };
    if manager.save(&credentials) {
        println!("Token stored.");
        Ok(())
    } else {
        Err(eyre!(
            "failed to write {}",
            manager.credentials_path().display()
        ))
    }
}

/// Remove the stored token.
pub fn handle_token_clear() -> Result<()> {
    let manager = manager()?;
    if manager.clear() {
        println!("Token cleared.");
        Ok(())
    } else {
        Err(eyre!(
            "failed to remove {}",
            manager.credentials_path().display()
        ))
    }
}

/// Report whether a token is stored.
pub fn handle_token_status() -> Result<()> {
    let manager = manager()?;
    if manager.load().has_token() {
        println!("A token is configured.");
    } else {
        println!("No token configured. Run `wfold token set` to add one.");
    }
    Ok(())
}
