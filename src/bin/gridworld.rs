//! gridworld CLI - tabular Q-learning on 2-D grid worlds

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gridworld")]
#[command(version, about = "Tabular Q-learning on 2-D grid worlds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a Q-table on a grid map and print the learned values
    Learn(gridworld::cli::commands::learn::LearnArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Learn(args) => gridworld::cli::commands::learn::execute(args),
    }
}
