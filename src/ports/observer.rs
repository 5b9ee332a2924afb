//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events, allowing
//! composable data collection without coupling the training driver to
//! specific output formats or metrics.

use crate::{
    Result,
    grid::{Action, AgentState},
    pipeline::training::EpisodeOutcome,
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during
/// training: progress bars for user feedback, per-step traces, JSONL export
/// for analysis, metrics tracking for evaluation.
///
/// # Event Sequence
///
/// 1. `on_training_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode, state)` - after the start state is sampled
///    - `on_step(...)` - after each value update, with the new state
///    - `on_episode_end(episode, outcome)` - once the state is terminal
/// 3. `on_training_end()` - once at the end
///
/// Every method has a no-op default, so implementations override only the
/// events they care about.
pub trait Observer: Send {
    /// Called when training starts, before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts with the freshly sampled state.
    fn on_episode_start(&mut self, _episode: usize, _state: &AgentState<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after each step with the action taken and the state it led to.
    ///
    /// The Q-table entry for the *previous* state has already been updated
    /// when this fires.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _state: &AgentState<'_>,
        _action: Action,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode reaches a terminal state.
    fn on_episode_end(&mut self, _episode: usize, _outcome: EpisodeOutcome) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
