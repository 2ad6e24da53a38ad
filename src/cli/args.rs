//! Command-line argument parsing.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage information
    Help,
    /// Fetch and print the organized workflow list for `owner/name`
    Show { repo: String },
    /// Prompt for and store an API token
    TokenSet,
    /// Remove the stored API token
    TokenClear,
    /// Report whether a token is stored
    TokenStatus,
    /// Wipe all cached folder configs
    CacheClear,
    /// Enable folder organization for a repository
    Enable { repo: String },
    /// Disable folder organization for a repository
    Disable { repo: String },
    /// Arguments didn't parse; carries a usage message
    Invalid { message: String },
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use wfold::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["wfold".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
///
/// let args = vec!["wfold".to_string(), "octo/demo".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Show { repo: "octo/demo".to_string() }
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect(); // Skip the program name

    match args.first().map(String::as_str) {
        None => CliCommand::Help,
        Some("--version") | Some("-V") => CliCommand::Version,
        Some("--help") | Some("-h") | Some("help") => CliCommand::Help,
        Some("token") => match args.get(1).map(String::as_str) {
            Some("set") => CliCommand::TokenSet,
            Some("clear") => CliCommand::TokenClear,
            Some("status") | None => CliCommand::TokenStatus,
            Some(other) => CliCommand::Invalid {
                message: format!("unknown token subcommand: {}", other),
            },
        },
        Some("cache") => match args.get(1).map(String::as_str) {
            Some("clear") => CliCommand::CacheClear,
            _ => CliCommand::Invalid {
                message: "usage: wfold cache clear".to_string(),
            },
        },
        Some("enable") => match args.get(1) {
            Some(repo) => CliCommand::Enable { repo: repo.clone() },
            None => CliCommand::Invalid {
                message: "usage: wfold enable <owner>/<name>".to_string(),
            },
        },
        Some("disable") => match args.get(1) {
            Some(repo) => CliCommand::Disable { repo: repo.clone() },
            None => CliCommand::Invalid {
                message: "usage: wfold disable <owner>/<name>".to_string(),
            },
        },
        Some(repo) if repo.contains('/') && !repo.starts_with('-') => CliCommand::Show {
            repo: repo.to_string(),
        },
        Some(other) => CliCommand::Invalid {
            message: format!("unknown command: {}", other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut full = vec!["wfold".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        parse_args(full.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(parse(&["--help"]), CliCommand::Help);
        assert_eq!(parse(&["-h"]), CliCommand::Help);
        assert_eq!(parse(&["help"]), CliCommand::Help);
        assert_eq!(parse(&[]), CliCommand::Help);
    }

    #[test]
    fn test_parse_show() {
        assert_eq!(
            parse(&["octo/demo"]),
            CliCommand::Show {
                repo: "octo/demo".to_string()
            }
        );
    }

    #[test]
    fn test_parse_token_subcommands() {
        assert_eq!(parse(&["token", "set"]), CliCommand::TokenSet);
        assert_eq!(parse(&["token", "clear"]), CliCommand::TokenClear);
        assert_eq!(parse(&["token", "status"]), CliCommand::TokenStatus);
        assert_eq!(parse(&["token"]), CliCommand::TokenStatus);
        assert!(matches!(
            parse(&["token", "frobnicate"]),
            CliCommand::Invalid { .. }
        ));
    }

    #[test]
    fn test_parse_cache_clear() {
        assert_eq!(parse(&["cache", "clear"]), CliCommand::CacheClear);
        assert!(matches!(parse(&["cache"]), CliCommand::Invalid { .. }));
    }

    #[test]
    fn test_parse_enable_disable() {
        assert_eq!(
            parse(&["enable", "octo/demo"]),
            CliCommand::Enable {
                repo: "octo/demo".to_string()
            }
        );
        assert_eq!(
            parse(&["disable", "octo/demo"]),
            CliCommand::Disable {
                repo: "octo/demo".to_string()
            }
        );
        assert!(matches!(parse(&["enable"]), CliCommand::Invalid { .. }));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(parse(&["frobnicate"]), CliCommand::Invalid { .. }));
        assert!(matches!(parse(&["--unknown"]), CliCommand::Invalid { .. }));
    }
}
