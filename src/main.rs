//! # GMH CLI
//!
//! A Rust command-line client for a Generic Metadata Handler (GMH) service
//! managing URN:NBN persistent identifiers and their resolvable locations.
//!
//! ## Quick Start
//!
//! ```bash
//! # Obtain an API token (prompts for credentials)
//! gmh token
//!
//! # Register an NBN with two locations
//! gmh nbn write urn:nbn:nl:ui:13-abc-def https://repo.example.org/123 https://mirror.example.org/123
//!
//! # Bulk-register from a CSV file, pausing 2 seconds between rows
//! gmh nbn write --input-file records.csv --wait 2s
//!
//! # Read a record back
//! gmh nbn read urn:nbn:nl:ui:13-abc-def
//!
//! # Find NBNs by location
//! gmh nbn find https://repo.example.org/123
//! ```
//!
//! ## Configuration
//!
//! The service URL and authentication are read from `~/.config/gmh/config.yaml`
//! or the path in `GMH_CLI_CONFIG`.
//!
//! ## Exit codes
//!
//! - `0` - operation (or entire batch) completed
//! - `1` - the remote call failed
//! - `2` - caller/input error (bad arguments, unreadable batch file, bad config)
//! - `3` - batch processing interrupted

use clap::Parser;
use gmh_cli::constants::{EXIT_REMOTE_ERROR, EXIT_USAGE};
use gmh_cli::{commands, Cli};

/// Main entry point for the GMH CLI
///
/// Parses command-line arguments, delegates to the appropriate command
/// handler and turns its outcome into a process exit code.
#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(EXIT_USAGE);
    });
    let code = match commands::run(cmd).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_REMOTE_ERROR
        }
    };
    std::process::exit(code);
}
