//! CLI module.
//!
//! This module provides command-line interface functionality:
//! - Argument parsing
//! - The main `show` command (fetch, group, print)
//! - Token management
//! - Cache and per-repository settings maintenance
//!
//! # Usage
//!
//! ```ignore
//! use wfold::cli::{parse_args, run};
//!
//! let command = parse_args(std::env::args());
//! let runtime = tokio::runtime::Runtime::new()?;
//! run(command, &runtime)?;
//! ```

pub mod args;
pub mod maintenance;
pub mod show;
pub mod token;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use maintenance::{handle_cache_clear, handle_set_enabled};
pub use show::handle_show_command;
pub use token::{handle_token_clear, handle_token_set, handle_token_status};
pub use version::{handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tokio::runtime::Runtime;

const USAGE: &str = "\
wfold: organize a repository's workflow list into folders

USAGE:
    wfold <owner>/<name>        fetch and print the organized workflow list
    wfold token set             store an API token (prompted, not echoed)
    wfold token clear           remove the stored token
    wfold token status          report whether a token is stored
    wfold cache clear           wipe all cached folder configs
    wfold enable <owner>/<name>    turn folder organization on for a repository
    wfold disable <owner>/<name>   turn folder organization off for a repository
    wfold --version             print the version
    wfold --help                print this help";

/// Execute a parsed CLI command.
pub fn run(command: CliCommand, runtime: &Runtime) -> Result<()> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Show { repo } => handle_show_command(&repo, runtime),
        CliCommand::TokenSet => handle_token_set(),
        CliCommand::TokenClear => handle_token_clear(),
        CliCommand::TokenStatus => handle_token_status(),
        CliCommand::CacheClear => handle_cache_clear(),
        CliCommand::Enable { repo } => handle_set_enabled(&repo, true),
        CliCommand::Disable { repo } => handle_set_enabled(&repo, false),
        CliCommand::Invalid { message } => Err(eyre!("{}\n\n{}", message, USAGE)),
    }
}
