//! Tabular Q-learning on 2-D grid worlds
//!
//! This crate provides:
//! - A grid environment parsed from a one-line map descriptor
//! - Agent states with legality, reward, and terminal queries
//! - A dense Q-table with the off-policy temporal difference update
//! - A sequential training driver with composable observers
//! - A CLI for training and rendering learned value tables

pub mod cli;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use grid::{ACTIONS, Action, AgentState, DEFAULT_MAP, GridEnvironment};
pub use pipeline::{
    EpisodeOutcome, JsonlObserver, MetricsObserver, ProgressObserver, TraceObserver, Trainer,
    TrainerConfig, TrainingResult,
};
pub use ports::Observer;
pub use q_learning::{QTable, QValue};
