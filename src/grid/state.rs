//! Agent state: a position within a grid environment

use std::fmt;

use crate::grid::{
    action::Action,
    env::{self, GOAL, GridEnvironment, HAZARD},
};

/// Reward for reaching a goal cell
pub const GOAL_REWARD: f64 = 10.0;
/// Reward for reaching a hazard cell
pub const HAZARD_REWARD: f64 = -10.0;

/// A position within a grid environment
///
/// States are cheap `Copy` values holding a shared environment reference; a
/// state never outlives the environment it points into. A reachable state is
/// always in bounds, but [`AgentState::execute`] can produce an out-of-bounds
/// position, which [`AgentState::is_legal`] must reject *before* execution.
#[derive(Debug, Clone, Copy)]
pub struct AgentState<'e> {
    env: &'e GridEnvironment,
    x: i32,
    y: i32,
}

impl<'e> AgentState<'e> {
    pub fn new(env: &'e GridEnvironment, x: i32, y: i32) -> Self {
        Self { env, x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Cell under the agent, or `None` for an off-grid state
    pub fn cell(&self) -> Option<char> {
        self.env.get(self.x, self.y)
    }

    /// True iff the action's destination cell exists and is passable
    /// (open floor, goal, or hazard)
    pub fn is_legal(&self, action: Action) -> bool {
        let (dx, dy) = action.delta();
        self.env
            .get(self.x + dx, self.y + dy)
            .is_some_and(env::is_passable)
    }

    /// Filter `actions` down to the legal ones, preserving input order
    pub fn legal_actions(&self, actions: &[Action]) -> Vec<Action> {
        actions
            .iter()
            .copied()
            .filter(|&action| self.is_legal(action))
            .collect()
    }

    /// Reward of the current cell: `None` off-grid, otherwise +10 on goal,
    /// -10 on hazard, 0 on anything else
    pub fn reward(&self) -> Option<f64> {
        self.cell().map(|cell| match cell {
            GOAL => GOAL_REWARD,
            HAZARD => HAZARD_REWARD,
            _ => 0.0,
        })
    }

    /// True iff the episode ends here
    ///
    /// Terminality is "reward differs from 0": goal and hazard cells, and
    /// also an off-grid state whose reward is `None`. The latter is
    /// unreachable through the legality-checked path, but a state
    /// constructed out of bounds reports terminal rather than posing as a
    /// live position.
    pub fn is_terminal(&self) -> bool {
        self.reward() != Some(0.0)
    }

    /// Advance by the action's displacement, returning the new state
    ///
    /// Callers are expected to have validated the action with
    /// [`AgentState::is_legal`]; no re-check happens here. The receiver is
    /// `Copy`, so the previous state stays usable for the value update.
    pub fn execute(mut self, action: Action) -> AgentState<'e> {
        let (dx, dy) = action.delta();
        self.x += dx;
        self.y += dy;
        self
    }
}

/// Bordered grid rendering with `A` marking the agent's cell
///
/// The agent mark is substituted during formatting, so the environment is
/// never written to.
impl fmt::Display for AgentState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " {}", "-".repeat(self.env.width()))?;
        for y in 0..self.env.height() {
            write!(f, "|")?;
            for (x, &cell) in self.env.row(y).iter().enumerate() {
                let shown = if x as i32 == self.x && y as i32 == self.y {
                    'A'
                } else {
                    cell
                };
                write!(f, "{shown}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, " {}", "-".repeat(self.env.width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{ACTIONS, env::DEFAULT_MAP};

    fn default_env() -> GridEnvironment {
        GridEnvironment::parse(DEFAULT_MAP).unwrap()
    }

    #[test]
    fn rewards_match_cell_kinds() {
        let env = default_env();
        assert_eq!(AgentState::new(&env, 6, 2).reward(), Some(GOAL_REWARD));
        assert_eq!(AgentState::new(&env, 6, 1).reward(), Some(HAZARD_REWARD));
        assert_eq!(AgentState::new(&env, 0, 0).reward(), Some(0.0));
        assert_eq!(AgentState::new(&env, -1, 0).reward(), None);
    }

    #[test]
    fn terminality_follows_reward() {
        let env = default_env();
        assert!(AgentState::new(&env, 6, 2).is_terminal());
        assert!(AgentState::new(&env, 6, 1).is_terminal());
        assert!(!AgentState::new(&env, 0, 0).is_terminal());
        // Off-grid reward is None, which also reads as terminal.
        assert!(AgentState::new(&env, -1, -1).is_terminal());
    }

    #[test]
    fn corner_rejects_moves_leaving_the_grid() {
        let env = default_env();
        let corner = AgentState::new(&env, 0, 0);
        assert!(!corner.is_legal(Action::Up));
        assert!(!corner.is_legal(Action::Left));
        assert!(corner.is_legal(Action::Right));
        assert!(corner.is_legal(Action::Down));

        let right_edge = AgentState::new(&env, 6, 0);
        assert!(!right_edge.is_legal(Action::Right));
        let bottom_edge = AgentState::new(&env, 0, 4);
        assert!(!bottom_edge.is_legal(Action::Down));
    }

    #[test]
    fn interior_open_cell_has_all_four_actions() {
        let env = default_env();
        let state = AgentState::new(&env, 5, 1);
        assert_eq!(state.legal_actions(&ACTIONS), ACTIONS.to_vec());
    }

    #[test]
    fn walls_are_impassable() {
        let env = default_env();
        let state = AgentState::new(&env, 0, 1);
        assert!(!state.is_legal(Action::Right)); // (1, 1) is '#'
        assert!(state.is_legal(Action::Up));
    }

    #[test]
    fn execute_applies_displacement_without_touching_the_original() {
        let env = default_env();
        let state = AgentState::new(&env, 5, 2);
        let next = state.execute(Action::Right);
        assert_eq!((next.x(), next.y()), (6, 2));
        assert_eq!((state.x(), state.y()), (5, 2));
    }

    #[test]
    fn display_marks_the_agent_cell() {
        let env = default_env();
        let rendered = AgentState::new(&env, 0, 0).to_string();
        assert!(rendered.starts_with(" -------\n|A      |"));
        assert!(rendered.ends_with(" -------"));
    }
}
