//! CLI infrastructure for the gridworld trainer
//!
//! This module provides the command-line interface for training a Q-table
//! on a map and rendering the learned values.

pub mod commands;
pub mod output;
