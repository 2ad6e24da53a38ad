use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use wfold::cli::{self, VERSION};

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version" || arg == "-V") {
        println!("wfold {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;

    // Diagnostics go to stderr and only when RUST_LOG asks for them;
    // command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let command = cli::parse_args(std::env::args());

    // Create a Tokio runtime for the command handlers that do network I/O.
    let runtime = tokio::runtime::Runtime::new()?;

    cli::run(command, &runtime)
}
