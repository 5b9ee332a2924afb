//! The four directional actions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A directional move on the grid
///
/// The discriminant doubles as the action's index into the Q-table's inner
/// dimension, so the name-to-index mapping lives in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// The fixed action set, in table-index order
pub const ACTIONS: [Action; Action::COUNT] = [Action::Up, Action::Right, Action::Down, Action::Left];

impl Action {
    /// Number of actions; the Q-table's inner dimension
    pub const COUNT: usize = 4;

    /// Displacement `(dx, dy)` applied by this action
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
        }
    }

    /// Index into the Q-table's inner dimension (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case label used for table rendering
    pub fn label(self) -> &'static str {
        match self {
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
        }
    }

    /// Single-character arrow for policy rendering
    pub fn arrow(self) -> char {
        match self {
            Action::Up => '^',
            Action::Right => '>',
            Action::Down => 'v',
            Action::Left => '<',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
