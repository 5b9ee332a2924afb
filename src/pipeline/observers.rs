//! Observer adapters for training runs
//!
//! Observers allow composable data collection during training without
//! coupling the driver to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    grid::{Action, AgentState},
    pipeline::training::EpisodeOutcome,
    ports::Observer,
};

/// Observation of a single step during an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Episode number
    pub episode: usize,
    /// Step number within the episode
    pub step: usize,
    /// Agent x coordinate after the step
    pub x: i32,
    /// Agent y coordinate after the step
    pub y: i32,
    /// Action taken
    pub action: String,
}

/// Complete observation of one training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeObservation {
    /// Episode number
    pub episode: usize,
    /// Reward of the terminal cell
    pub terminal_reward: f64,
    /// Total steps in the episode
    pub total_steps: usize,
    /// Steps in visit order
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    goals: usize,
    hazards: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            goals: 0,
            hazards: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: EpisodeOutcome) -> Result<()> {
        if outcome.reached_goal() {
            self.goals += 1;
        } else {
            self.hazards += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position((episode + 1) as u64);
            pb.set_message(format!("G:{} H:{}", self.goals, self.hazards));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("G:{} H:{}", self.goals, self.hazards));
        }
        Ok(())
    }
}

/// Metrics observer - tracks episode lengths and terminal outcomes
pub struct MetricsObserver {
    goals: usize,
    hazards: usize,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            goals: 0,
            hazards: 0,
            episode_lengths: Vec::new(),
        }
    }

    pub fn episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    pub fn goal_rate(&self) -> f64 {
        if self.episodes() == 0 {
            0.0
        } else {
            self.goals as f64 / self.episodes() as f64
        }
    }

    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes(),
            goals: self.goals,
            hazards: self.hazards,
            goal_rate: self.goal_rate(),
            avg_episode_length: self.avg_episode_length(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub goals: usize,
    pub hazards: usize,
    pub goal_rate: f64,
    pub avg_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: EpisodeOutcome) -> Result<()> {
        self.episode_lengths.push(outcome.steps);
        if outcome.reached_goal() {
            self.goals += 1;
        } else {
            self.hazards += 1;
        }
        Ok(())
    }
}

/// Trace observer - prints the grid for every visited state
///
/// Reproduces the step-by-step walk on stdout: the sampled start state and
/// then the state after every move, each as a bordered grid with the agent
/// marked.
pub struct TraceObserver;

impl TraceObserver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TraceObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for TraceObserver {
    fn on_episode_start(&mut self, _episode: usize, state: &AgentState<'_>) -> Result<()> {
        println!("{state}");
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        state: &AgentState<'_>,
        _action: Action,
    ) -> Result<()> {
        println!("{state}");
        Ok(())
    }
}

/// JSONL observer - exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_steps: Vec<StepObservation>,
    current_episode: usize,
}

impl JsonlObserver {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            current_steps: Vec::new(),
            current_episode: 0,
        })
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, episode: usize, _state: &AgentState<'_>) -> Result<()> {
        self.current_episode = episode;
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(
        &mut self,
        episode: usize,
        step: usize,
        state: &AgentState<'_>,
        action: Action,
    ) -> Result<()> {
        self.current_steps.push(StepObservation {
            episode,
            step,
            x: state.x(),
            y: state.y(),
            action: action.to_string(),
        });
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: EpisodeOutcome) -> Result<()> {
        let observation = EpisodeObservation {
            episode,
            terminal_reward: outcome.terminal_reward,
            total_steps: self.current_steps.len(),
            steps: std::mem::take(&mut self.current_steps),
        };

        // One JSON object per line
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_observer_accumulates_outcomes() {
        let mut metrics = MetricsObserver::new();
        metrics
            .on_episode_end(
                0,
                EpisodeOutcome {
                    steps: 4,
                    terminal_reward: 10.0,
                },
            )
            .unwrap();
        metrics
            .on_episode_end(
                1,
                EpisodeOutcome {
                    steps: 8,
                    terminal_reward: -10.0,
                },
            )
            .unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.goals, 1);
        assert_eq!(summary.hazards, 1);
        assert!((summary.goal_rate - 0.5).abs() < 1e-12);
        assert!((summary.avg_episode_length - 6.0).abs() < 1e-12);
    }
}
