//! Unified linkhub CLI.
//!
//! - `linkhub rank` - Show which links a visitor sees, in order
//! - `linkhub normalize` - Prepare edited links for saving
//! - `linkhub stats` - Summarize visits, clicks and CTR

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use linkhub::cli::{NormalizeArgs, RankArgs, StatsArgs, run_normalize, run_rank, run_stats};

/// Linkhub unified CLI.
#[derive(Parser)]
#[command(
    name = "linkhub",
    version,
    about = "Rule-based link visibility and ranking for link hubs",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a hub's links for one visitor.
    #[command(name = "rank")]
    Rank(Box<RankArgs>),

    /// Trim link fields and keep the newest rule of each type.
    #[command(name = "normalize", alias = "sync")]
    Normalize(NormalizeArgs),

    /// Summarize visits, clicks and click-through rates.
    #[command(name = "stats")]
    Stats(StatsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rank(args) => run_rank(*args),
        Commands::Normalize(args) => run_normalize(args),
        Commands::Stats(args) => run_stats(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
