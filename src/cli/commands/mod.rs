//! CLI command implementations

pub mod learn;
