//! # GMH CLI Library
//!
//! Core library functionality for the GMH CLI tool.

use clap::Parser;

pub mod batch;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;

/// CLI tool for managing URN:NBN records in a GMH service
///
/// The GMH CLI talks to a Generic Metadata Handler service that registers
/// URN:NBN persistent identifiers and the locations they resolve to. It
/// supports obtaining an API token, writing records (single or CSV batch),
/// reading records and finding NBNs by location.
#[derive(Parser)]
#[command(
    name = "gmh",
    version,
    about = "Manage URN:NBN records in a GMH service",
    long_about = "Command-line client for a Generic Metadata Handler (GMH) service.\n\nRegisters URN:NBN persistent identifiers with their resolvable locations,\nreads existing records, finds NBNs by location and issues API tokens.\nBulk registrations are supported through a CSV input file with configurable\npacing between rows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}
