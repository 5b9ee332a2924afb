//! Tabular Q-learning core
//!
//! Off-policy temporal difference control over a dense value table. Each
//! `(position, action)` pair holds one estimate, updated toward the observed
//! reward plus the discounted best value of the successor state:
//!
//! Q(s,a) ← (1 − α)·Q(s,a) + α·(r + γ·max_a' Q(s',a'))
//!
//! Entries start as an explicit [`QValue::Unset`] variant rather than a
//! numeric sentinel; unset entries read as 0.0 everywhere the math needs a
//! number, while rendering can still tell "never written" from "written as
//! 0.0".

pub mod q_table;

pub use q_table::{QTable, QValue};
