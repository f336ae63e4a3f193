use anyhow::Result;
use clap::Subcommand;

use crate::client::GmhClient;
use crate::config::load_config;
use crate::constants::EXIT_USAGE;

pub mod completions;
pub mod find;
pub mod read;
pub mod token;
pub mod write;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Get a token for the GMH API")]
    Token(token::TokenArgs),
    #[command(about = "Manage NBN records")]
    Nbn {
        #[command(subcommand)]
        cmd: NbnCommands,
    },
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

#[derive(Subcommand, Debug)]
pub enum NbnCommands {
    #[command(about = "Write an NBN record to the GMH service, or many from a CSV file")]
    Write(write::WriteArgs),
    #[command(about = "Read an NBN record")]
    Read(read::ReadArgs),
    #[command(about = "Find NBNs by their location. This only works for LTP locations")]
    Find(find::FindArgs),
}

/// Dispatch the selected command and return the process exit code.
///
/// Every command except `completions` talks to the service, so the config is
/// loaded and the client built here once. A config that cannot be loaded is
/// a caller error, reported before any remote call.
pub async fn run(cmd: Commands) -> Result<i32> {
    let cmd = match cmd {
        Commands::Completions { shell } => return completions::run(shell),
        cmd => cmd,
    };

    let cfg = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(EXIT_USAGE);
        }
    };
    let api = match GmhClient::new(&cfg.gmh) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(EXIT_USAGE);
        }
    };

    match cmd {
        Commands::Token(args) => token::run(&api, args).await,
        Commands::Nbn { cmd } => match cmd {
            NbnCommands::Write(args) => write::run(&api, args).await,
            NbnCommands::Read(args) => read::run(&api, args).await,
            NbnCommands::Find(args) => find::run(&api, args).await,
        },
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
