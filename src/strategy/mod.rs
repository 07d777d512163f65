//! Move selection for AI-controlled seats.
//!
//! Selectors are trait-based so that the game runner can drive any mix of
//! heuristics, one per seat:
//! - `FirstLegal`: take the first offered move
//! - `CapturePriority`: capture, leave base, then run for home
//! - `GreedyProgress`: maximise resulting progress
//! - `RandomMove`: uniform over the offered moves

pub mod selector;

pub use selector::{CapturePriority, FirstLegal, GreedyProgress, MoveSelector, RandomMove};
