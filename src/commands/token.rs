use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use crate::client::GmhClient;
use crate::constants::{EXIT_OK, EXIT_REMOTE_ERROR};

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// The username to use for authentication
    #[arg(short, long)]
    pub username: Option<String>,

    /// Do not output informational messages on stderr. (Token is still printed to stdout.)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Exchange credentials for a fresh API token.
///
/// The service invalidates the previously issued token for the same user, so
/// the user is warned on stderr before any prompt or call. Only the token
/// itself goes to stdout.
pub async fn run(api: &GmhClient, args: TokenArgs) -> Result<i32> {
    if !args.quiet {
        eprintln!("WARNING: this will render the current token invalid. (Ctrl-C to abort.)");
    }
    let username = match args.username {
        Some(username) => username,
        None => Input::new().with_prompt("Enter username").interact_text()?,
    };
    let password = Password::new().with_prompt("Enter password").interact()?;
    match api.token(&username, &password).await {
        Ok(token) => {
            if !args.quiet {
                eprintln!("Token (re-)generated for user {username}");
            }
            println!("{token}");
            Ok(EXIT_OK)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(EXIT_REMOTE_ERROR)
        }
    }
}
