//! Training pipeline abstractions
//!
//! This module provides the sequential training driver and the observer
//! adapters that record what happens during a run.

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{
    EpisodeObservation, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
    StepObservation, TraceObserver,
};
pub use training::{EpisodeOutcome, Trainer, TrainerConfig, TrainingResult};

pub use crate::ports::Observer;
