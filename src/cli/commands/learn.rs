//! Learn command - train a Q-table on a map and print the learned values

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, render_policy, render_q_table},
    grid::{DEFAULT_MAP, GridEnvironment},
    pipeline::{JsonlObserver, ProgressObserver, TraceObserver, Trainer, TrainerConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-table on a grid map", allow_negative_numbers = true)]
pub struct LearnArgs {
    /// Map descriptor (rows separated by '|'); defaults to the reference map
    pub map: Option<String>,

    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.10)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.90)]
    pub gamma: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the grid for every visited state
    #[arg(long)]
    pub trace: bool,

    /// Suppress the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: LearnArgs) -> Result<()> {
    let descriptor = args.map.as_deref().unwrap_or(DEFAULT_MAP);
    let environment = GridEnvironment::parse(descriptor)?;

    let config = TrainerConfig {
        episodes: args.episodes,
        alpha: args.alpha,
        gamma: args.gamma,
        seed: args.seed,
    };

    let mut trainer = Trainer::new(&environment, config);
    if args.trace {
        // The trace interleaves badly with a progress bar, so it replaces it.
        trainer = trainer.with_observer(Box::new(TraceObserver::new()));
    } else if !args.quiet {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.observations {
        trainer = trainer.with_observer(Box::new(JsonlObserver::new(path)?));
    }

    let result = trainer.train()?;

    print_section("Q-table");
    println!("{}", render_q_table(trainer.q_table()));

    print_section("Greedy policy");
    println!("{}", render_policy(&environment, trainer.q_table()));

    print_section("Training summary");
    print_kv("episodes", &result.episodes.to_string());
    print_kv("total steps", &result.total_steps.to_string());
    print_kv(
        "goal / hazard",
        &format!("{} / {}", result.goals, result.hazards),
    );
    print_kv("goal rate", &format!("{:.2}", result.goal_rate));
    print_kv(
        "avg episode length",
        &format!("{:.1}", result.avg_episode_length),
    );

    if let Some(path) = &args.summary {
        result.save(path)?;
        print_kv("summary written to", &path.display().to_string());
    }

    Ok(())
}
