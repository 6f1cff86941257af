//! Command-line tools for generating and checking magic bitboard data.
//! Each tool is an individual subcommand.

mod search;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

/// Magic bitboard tooling for lodestone.
#[derive(Parser)]
#[command(author, version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Each tool has its own option struct defined in its module.
#[derive(Subcommand)]
enum Command {
    Search(search::SearchOptions),
    Verify(verify::VerifyOptions),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    info!("lodestone starting");

    match cli.command {
        Command::Search(opts) => search::run(&opts),
        Command::Verify(opts) => verify::run(&opts),
    }
}
