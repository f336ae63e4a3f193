use anyhow::Result;
use clap::Args;

use crate::client::GmhClient;
use crate::constants::{EXIT_OK, EXIT_REMOTE_ERROR};

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// The URN:NBN to read from the GMH service
    #[arg(value_name = "nbn")]
    pub nbn: String,

    /// Only show the locations of the NBN
    #[arg(short = 'l', long)]
    pub only_locations: bool,
}

/// Print an NBN record (or just its locations) as JSON on stdout.
pub async fn run(api: &GmhClient, args: ReadArgs) -> Result<i32> {
    if args.only_locations {
        match api.get_locations(&args.nbn).await {
            Ok(locations) => {
                for location in locations {
                    println!("{}", serde_json::to_string(&location)?);
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_REMOTE_ERROR);
            }
        }
    } else {
        match api.get_nbn_record(&args.nbn).await {
            Ok(record) => println!("{}", serde_json::to_string(&record)?),
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_REMOTE_ERROR);
            }
        }
    }
    Ok(EXIT_OK)
}
