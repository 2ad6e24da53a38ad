//! Credential storage for the optional API token.

pub mod credentials;

pub use credentials::{Credentials, CredentialsManager};
