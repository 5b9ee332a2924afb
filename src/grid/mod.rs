//! Grid world domain: environment, agent states, and actions
//!
//! The environment is an immutable-shape character grid parsed from a map
//! descriptor. Agent states are cheap `Copy` values referencing their
//! environment; the four directional actions form a process-wide constant.

pub mod action;
pub mod env;
pub mod state;

pub use action::{ACTIONS, Action};
pub use env::{DEFAULT_MAP, GOAL, GridEnvironment, HAZARD, OPEN, WALL};
pub use state::{AgentState, GOAL_REWARD, HAZARD_REWARD};
