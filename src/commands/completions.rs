use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io;

use crate::constants::{EXIT_OK, EXIT_USAGE};
use crate::Cli;

pub fn run(shell: String) -> Result<i32> {
    let mut cmd = Cli::command();
    match shell.as_str() {
        "bash" => generate(Bash, &mut cmd, "gmh", &mut io::stdout()),
        "zsh" => generate(Zsh, &mut cmd, "gmh", &mut io::stdout()),
        "fish" => generate(Fish, &mut cmd, "gmh", &mut io::stdout()),
        other => {
            eprintln!("unsupported shell '{}', choose: bash, zsh, fish", other);
            return Ok(EXIT_USAGE);
        }
    }
    Ok(EXIT_OK)
}
