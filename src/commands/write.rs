use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use crate::batch::{parse_wait_duration, run_batch, write_record};
use crate::client::GmhClient;
use crate::constants::{EXIT_OK, EXIT_REMOTE_ERROR, EXIT_USAGE};

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// The URN:NBN to write to the GMH service
    #[arg(
        value_name = "nbn",
        required_unless_present = "input_file",
        conflicts_with = "input_file",
        requires = "locations"
    )]
    pub nbn: Option<String>,

    /// The locations to which the NBN should resolve
    #[arg(value_name = "location", conflicts_with = "input_file")]
    pub locations: Vec<String>,

    /// CSV file with columns NBN, LOCATION. Each row results in a write operation for that NBN
    #[arg(short, long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Duration to wait between rows, e.g. '2s', '500ms'. Only valid with --input-file
    #[arg(short, long, default_value = "1s", requires = "input_file")]
    pub wait: String,

    /// Do not output informational messages on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Force the registration of the NBN, even if it is already registered
    #[arg(short, long)]
    pub force: bool,
}

/// The two mutually exclusive forms of the write command, resolved once from
/// the parsed arguments. Both end up in `batch::write_record`: a single
/// write is the one-row case of the same primitive.
enum WriteJob {
    Single {
        nbn: String,
        locations: Vec<String>,
    },
    Batch {
        input_file: PathBuf,
        wait: Duration,
    },
}

fn resolve_job(args: &WriteArgs) -> Result<WriteJob, i32> {
    if let Some(input_file) = &args.input_file {
        let Some(wait) = parse_wait_duration(&args.wait) else {
            eprintln!("Error: Invalid wait duration format. Use e.g. '2s', '500ms'.");
            return Err(EXIT_USAGE);
        };
        return Ok(WriteJob::Batch {
            input_file: input_file.clone(),
            wait,
        });
    }
    match &args.nbn {
        Some(nbn) if !args.locations.is_empty() => Ok(WriteJob::Single {
            nbn: nbn.clone(),
            locations: args.locations.clone(),
        }),
        // clap enforces the exclusive groups; anything else is a usage error
        _ => Err(EXIT_USAGE),
    }
}

pub async fn run(api: &GmhClient, args: WriteArgs) -> Result<i32> {
    let job = match resolve_job(&args) {
        Ok(job) => job,
        Err(code) => return Ok(code),
    };
    match job {
        WriteJob::Single { nbn, locations } => {
            match write_record(api, &nbn, &locations, args.force, args.quiet).await {
                Ok(()) => Ok(EXIT_OK),
                Err(e) => {
                    eprintln!("Error: {e}");
                    Ok(EXIT_REMOTE_ERROR)
                }
            }
        }
        WriteJob::Batch { input_file, wait } => {
            Ok(run_batch(api, &input_file, wait, args.force, args.quiet).await)
        }
    }
}
