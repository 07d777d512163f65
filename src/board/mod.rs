//! Static description of the cross-shaped track.
//!
//! The topology answers pure lookups: where each colour starts, where it
//! leaves the shared track for its home column, which squares are safe, and
//! how long the track and home columns are. It never changes during a game.

pub mod topology;

pub use topology::{BoardTopology, SAFE_SQUARE_OFFSET};
pub use crate::error::BoardError;
