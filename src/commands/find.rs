use anyhow::Result;
use clap::Args;

use crate::client::GmhClient;
use crate::constants::{EXIT_OK, EXIT_REMOTE_ERROR};

#[derive(Args, Debug)]
pub struct FindArgs {
    /// The location for which to find NBNs
    #[arg(value_name = "location")]
    pub location: String,
}

/// Print every NBN registered for the location, one per stdout line. An
/// empty answer prints nothing and still succeeds.
pub async fn run(api: &GmhClient, args: FindArgs) -> Result<i32> {
    match api.find_by_location(&args.location).await {
        Ok(nbns) => {
            for nbn in nbns {
                println!("{nbn}");
            }
            Ok(EXIT_OK)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(EXIT_REMOTE_ERROR)
        }
    }
}
