//! Dense Q-table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::grid::{ACTIONS, Action, AgentState, GridEnvironment};

/// One Q-table cell: never written, or holding an estimate
///
/// `Unset` collapses to 0.0 for numeric use but stays distinguishable from a
/// stored 0.0, which rendering relies on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum QValue {
    #[default]
    Unset,
    Value(f64),
}

impl QValue {
    /// Numeric reading: unset entries count as 0.0
    pub fn numeric(self) -> f64 {
        match self {
            QValue::Unset => 0.0,
            QValue::Value(v) => v,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, QValue::Value(_))
    }
}

/// Q-value estimates for every `(position, action)` pair of an environment
///
/// Storage is a flat `height × width × 4` array allocated once per training
/// run, indexed by `(y, x, action_index)`; it never resizes. Position
/// accessors follow the environment's permissive bounds style: out-of-range
/// reads yield 0.0 and out-of-range writes are ignored, so no table
/// operation can fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    width: usize,
    height: usize,
    values: Vec<QValue>,
}

impl QTable {
    /// Allocate an all-unset table sized to the environment
    pub fn new(env: &GridEnvironment) -> Self {
        let (width, height) = (env.width(), env.height());
        Self {
            width,
            height,
            values: vec![QValue::Unset; width * height * Action::COUNT],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn slot(&self, x: i32, y: i32, action: Action) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * Action::COUNT + action.index())
    }

    /// Stored value for the pair, or 0.0 if never written
    pub fn get(&self, state: &AgentState<'_>, action: Action) -> f64 {
        self.slot(state.x(), state.y(), action)
            .map_or(0.0, |i| self.values[i].numeric())
    }

    /// Overwrite the stored value for the pair; always succeeds
    pub fn set(&mut self, state: &AgentState<'_>, action: Action, value: f64) {
        if let Some(i) = self.slot(state.x(), state.y(), action) {
            self.values[i] = QValue::Value(value);
        }
    }

    /// Raw table cell by grid coordinates, for rendering
    pub fn entry(&self, x: usize, y: usize, action: Action) -> QValue {
        self.slot(x as i32, y as i32, action)
            .map_or(QValue::Unset, |i| self.values[i])
    }

    /// Maximum Q-value over the four actions, floored at 0.0
    ///
    /// The running maximum starts at 0.0, so the result is never negative
    /// even when every stored entry is. This floor is table policy, not an
    /// artifact of the unset representation.
    pub fn max_q(&self, state: &AgentState<'_>) -> f64 {
        ACTIONS
            .iter()
            .fold(0.0_f64, |best, &action| best.max(self.get(state, action)))
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·max_next_q)
    ///
    /// α and γ are taken as given; out-of-range values produce divergent or
    /// non-standard updates rather than errors.
    pub fn q_learning_update(
        &mut self,
        state: &AgentState<'_>,
        action: Action,
        reward: f64,
        max_next_q: f64,
        alpha: f64,
        gamma: f64,
    ) {
        let old_q = self.get(state, action);
        let target = reward + gamma * max_next_q;
        let new_q = (1.0 - alpha) * old_q + alpha * target;
        self.set(state, action, new_q);
    }

    /// Number of entries that have been written at least once
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_set()).count()
    }

    /// True iff any action entry at `(x, y)` has been written
    pub fn visited(&self, x: usize, y: usize) -> bool {
        ACTIONS
            .iter()
            .any(|&action| self.entry(x, y, action).is_set())
    }

    /// Action with the highest value at `(x, y)` (first wins ties)
    pub fn greedy_action(&self, x: usize, y: usize) -> Action {
        let mut best = Action::Up;
        let mut best_q = self.entry(x, y, best).numeric();
        for &action in &ACTIONS[1..] {
            let q = self.entry(x, y, action).numeric();
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DEFAULT_MAP;

    fn default_env() -> GridEnvironment {
        GridEnvironment::parse(DEFAULT_MAP).unwrap()
    }

    #[test]
    fn fresh_table_reads_zero_everywhere() {
        let env = default_env();
        let table = QTable::new(&env);
        assert_eq!(table.set_count(), 0);
        for y in 0..env.height() as i32 {
            for x in 0..env.width() as i32 {
                let state = AgentState::new(&env, x, y);
                for action in ACTIONS {
                    assert_eq!(table.get(&state, action), 0.0);
                    assert!(!table.entry(x as usize, y as usize, action).is_set());
                }
            }
        }
    }

    #[test]
    fn set_then_get_round_trips_and_distinguishes_written_zero() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let state = AgentState::new(&env, 2, 0);
        table.set(&state, Action::Down, 0.0);
        assert_eq!(table.get(&state, Action::Down), 0.0);
        assert!(table.entry(2, 0, Action::Down).is_set());
        assert_eq!(table.set_count(), 1);
    }

    #[test]
    fn out_of_range_positions_read_zero_and_ignore_writes() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let outside = AgentState::new(&env, -1, 2);
        table.set(&outside, Action::Up, 5.0);
        assert_eq!(table.get(&outside, Action::Up), 0.0);
        assert_eq!(table.set_count(), 0);
    }

    #[test]
    fn max_q_is_floored_at_zero() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let state = AgentState::new(&env, 3, 0);
        for action in ACTIONS {
            table.set(&state, action, -2.5);
        }
        assert_eq!(table.max_q(&state), 0.0);
    }

    #[test]
    fn max_q_picks_the_largest_positive_entry() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let state = AgentState::new(&env, 3, 0);
        table.set(&state, Action::Up, 0.5);
        table.set(&state, Action::Right, 1.5);
        table.set(&state, Action::Down, 0.8);
        assert_eq!(table.max_q(&state), 1.5);
    }

    #[test]
    fn update_rule_is_exact_for_the_reference_parameters() {
        let env = default_env();
        let mut table = QTable::new(&env);
        // One step from (5, 2) onto the goal: old Q = 0, r = 10, max next = 0.
        let state = AgentState::new(&env, 5, 2);
        table.q_learning_update(&state, Action::Right, 10.0, 0.0, 0.10, 0.90);
        assert!((table.get(&state, Action::Right) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn update_blends_old_estimate_with_target() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let state = AgentState::new(&env, 1, 0);
        table.set(&state, Action::Right, 2.0);
        table.q_learning_update(&state, Action::Right, 0.0, 4.0, 0.5, 0.9);
        // (1 - 0.5) * 2.0 + 0.5 * (0.0 + 0.9 * 4.0) = 2.8
        assert!((table.get(&state, Action::Right) - 2.8).abs() < 1e-12);
    }

    #[test]
    fn greedy_action_prefers_highest_value_and_first_on_ties() {
        let env = default_env();
        let mut table = QTable::new(&env);
        let state = AgentState::new(&env, 4, 0);
        table.set(&state, Action::Down, 1.2);
        table.set(&state, Action::Left, 0.3);
        assert_eq!(table.greedy_action(4, 0), Action::Down);
        assert_eq!(table.greedy_action(0, 0), Action::Up);
    }
}
