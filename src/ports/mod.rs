//! Ports (trait boundaries) for external dependencies.
//!
//! Following hexagonal architecture, these traits are owned by the domain
//! and implemented by adapters elsewhere in the crate.

pub mod observer;

pub use observer::Observer;
