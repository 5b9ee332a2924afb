//! Sequential training driver for the Q-table

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::{ACTIONS, GridEnvironment},
    ports::Observer,
    q_learning::QTable,
};

/// Training configuration
///
/// `alpha` and `gamma` are expected in `[0, 1]` but deliberately not
/// validated; out-of-range values produce divergent or non-standard updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Learning rate α
    pub alpha: f64,

    /// Discount factor γ
    pub gamma: f64,

    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            alpha: 0.10,
            gamma: 0.90,
            seed: None,
        }
    }
}

/// Outcome of a single episode
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    /// Steps taken to reach the terminal state
    pub steps: usize,

    /// Reward of the terminal cell (+10 goal, -10 hazard)
    pub terminal_reward: f64,
}

impl EpisodeOutcome {
    /// True iff the episode ended on the goal cell
    pub fn reached_goal(&self) -> bool {
        self.terminal_reward > 0.0
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes completed
    pub episodes: usize,

    /// Steps summed over all episodes
    pub total_steps: usize,

    /// Episodes ending on the goal cell
    pub goals: usize,

    /// Episodes ending on a hazard cell
    pub hazards: usize,

    /// Fraction of episodes ending on the goal
    pub goal_rate: f64,

    /// Mean steps per episode
    pub avg_episode_length: f64,
}

impl TrainingResult {
    pub fn new(episodes: usize, total_steps: usize, goals: usize, hazards: usize) -> Self {
        let goal_rate = if episodes > 0 {
            goals as f64 / episodes as f64
        } else {
            0.0
        };
        let avg_episode_length = if episodes > 0 {
            total_steps as f64 / episodes as f64
        } else {
            0.0
        };

        Self {
            episodes,
            total_steps,
            goals,
            hazards,
            goal_rate,
            avg_episode_length,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Drives episodes against an environment, mutating one shared Q-table
///
/// Execution is single-threaded and strictly sequential: one action per
/// step, one episode completes before the next begins, and the Q-table is
/// exclusively owned by the run.
pub struct Trainer<'e> {
    env: &'e GridEnvironment,
    q_table: QTable,
    config: TrainerConfig,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl<'e> Trainer<'e> {
    /// Create a trainer with a fresh all-unset Q-table sized to `env`
    pub fn new(env: &'e GridEnvironment, config: TrainerConfig) -> Self {
        Self {
            env,
            q_table: QTable::new(env),
            rng: build_rng(config.seed),
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the run
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// Run one episode from a freshly sampled open state
    ///
    /// Loops until the current state is terminal: filter the four-action set
    /// down to the legal moves, sample one uniformly, advance a copy of the
    /// state, and blend the old estimate for the previous pair with the
    /// observed reward plus the discounted best next value. Termination is a
    /// random walk onto a goal or hazard cell; it is certain for maps where
    /// every open cell can reach one, but not bounded in step count.
    pub fn run_episode(&mut self, episode: usize) -> Result<EpisodeOutcome> {
        let env = self.env;
        let mut state = env.sample_open_state(&mut self.rng);

        for observer in &mut self.observers {
            observer.on_episode_start(episode, &state)?;
        }

        let mut steps = 0;
        while !state.is_terminal() {
            let legal = state.legal_actions(&ACTIONS);
            let action = *legal.choose(&mut self.rng).ok_or(Error::NoLegalActions {
                x: state.x(),
                y: state.y(),
            })?;

            // Advance a copy; legality was checked above, and the previous
            // state stays live for the value update.
            let next = state.execute(action);
            let reward = next.reward().unwrap_or(0.0);
            let max_next_q = self.q_table.max_q(&next);
            self.q_table.q_learning_update(
                &state,
                action,
                reward,
                max_next_q,
                self.config.alpha,
                self.config.gamma,
            );

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &next, action)?;
            }

            state = next;
            steps += 1;
        }

        let outcome = EpisodeOutcome {
            steps,
            terminal_reward: state.reward().unwrap_or(0.0),
        };

        for observer in &mut self.observers {
            observer.on_episode_end(episode, outcome)?;
        }

        Ok(outcome)
    }

    /// Run the configured number of independent episodes
    ///
    /// Each episode starts from a freshly sampled state; nothing carries
    /// over between episodes except the Q-table itself.
    pub fn train(&mut self) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut total_steps = 0;
        let mut goals = 0;
        let mut hazards = 0;

        for episode in 0..self.config.episodes {
            let outcome = self.run_episode(episode)?;
            total_steps += outcome.steps;
            if outcome.reached_goal() {
                goals += 1;
            } else {
                hazards += 1;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            total_steps,
            goals,
            hazards,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_MAP;

    #[test]
    fn training_completes_the_configured_number_of_episodes() {
        let env = GridEnvironment::parse(DEFAULT_MAP).unwrap();
        let config = TrainerConfig {
            episodes: 10,
            seed: Some(42),
            ..TrainerConfig::default()
        };

        let mut trainer = Trainer::new(&env, config);
        let result = trainer.train().unwrap();

        assert_eq!(result.episodes, 10);
        assert_eq!(result.goals + result.hazards, 10);
        assert!(result.total_steps >= 10);
        assert!(trainer.q_table().set_count() > 0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let env = GridEnvironment::parse(DEFAULT_MAP).unwrap();
        let config = TrainerConfig {
            episodes: 5,
            seed: Some(7),
            ..TrainerConfig::default()
        };

        let mut first = Trainer::new(&env, config.clone());
        let mut second = Trainer::new(&env, config);
        let outcome_a = first.train().unwrap();
        let outcome_b = second.train().unwrap();

        assert_eq!(outcome_a.total_steps, outcome_b.total_steps);
        assert_eq!(outcome_a.goals, outcome_b.goals);
    }
}
