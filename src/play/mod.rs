//! Automated play: run games between move selectors.

pub mod runner;

pub use runner::{GameRecord, GameRunner, RunnerConfig};
