//! Version display.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print version information.
pub fn handle_version_command() {
    println!("wfold {}", VERSION);
}
