//! Grid environment parsed from a map descriptor

use rand::Rng;

use crate::{
    error::{Error, Result},
    grid::state::AgentState,
};

/// Open floor: passable, reward 0, non-terminal
pub const OPEN: char = ' ';
/// Goal cell: passable, reward +10, terminal
pub const GOAL: char = '+';
/// Hazard cell: passable, reward -10, terminal
pub const HAZARD: char = '-';
/// Wall: impassable (any character outside the passable set behaves the same)
pub const WALL: char = '#';

/// Row delimiter in map descriptors
pub const ROW_DELIMITER: char = '|';

/// Reference default map: 7 columns x 5 rows
pub const DEFAULT_MAP: &str = "       | ###  -| # #  +| # ####|       ";

/// True for cells the agent may move onto
///
/// `#` is not in the passable set: it reads visually as a wall and the
/// legality check treats it as one. Its reward fallback of 0 is unreachable
/// in practice.
pub fn is_passable(cell: char) -> bool {
    matches!(cell, OPEN | GOAL | HAZARD)
}

/// A fixed-shape 2-D cell grid
///
/// Dimensions never change after construction; only cell contents may be
/// overwritten (via [`GridEnvironment::put`], intended for transient
/// rendering marks). The width is taken from the first row; non-rectangular
/// descriptors are accepted, and positions past the end of a short row read
/// as "no cell".
#[derive(Debug, Clone)]
pub struct GridEnvironment {
    grid: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl GridEnvironment {
    /// Parse a map descriptor into an environment
    ///
    /// Rows are separated by `|`. Fails only when the descriptor has no
    /// cells at all; everything else is resolved by the permissive cell
    /// accessors.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let grid: Vec<Vec<char>> = descriptor
            .split(ROW_DELIMITER)
            .map(|row| row.chars().collect())
            .collect();
        let width = grid.first().map_or(0, Vec::len);
        let height = grid.len();
        if width == 0 {
            return Err(Error::EmptyMap);
        }
        Ok(Self {
            grid,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(x, y)`, or `None` when the position is outside the grid
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Overwrite the cell at `(x, y)`; silently ignored out of bounds
    pub fn put(&mut self, x: i32, y: i32, value: char) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(cell) = self.grid.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = value;
        }
    }

    /// The y-th row, for rendering
    ///
    /// Panics when `y >= height`; rendering only iterates valid rows.
    pub fn row(&self, y: usize) -> &[char] {
        &self.grid[y]
    }

    /// Uniformly sample an open-floor cell and return an agent state there
    ///
    /// Rejection-samples until an open cell is hit. On a map with no open
    /// cell this loops forever; supplying at least one open cell is part of
    /// the caller's contract, and no bounded-retry failure mode exists.
    pub fn sample_open_state<R: Rng + ?Sized>(&self, rng: &mut R) -> AgentState<'_> {
        loop {
            let x = rng.random_range(0..self.width) as i32;
            let y = rng.random_range(0..self.height) as i32;
            if self.get(x, y) == Some(OPEN) {
                return AgentState::new(self, x, y);
            }
        }
    }
}
