//! Rule logic: move generation, the turn state machine and state invariants.
//!
//! - `movegen`: which moves a token can make with a die
//! - `engine`: `TurnEngine`, the only way states advance
//! - `invariants`: consistency checks run after every transition in debug builds

pub mod engine;
pub mod invariants;
pub mod movegen;

pub use engine::TurnEngine;
pub use invariants::{check_invariants, InvariantViolation};
pub use movegen::{global_position, has_pending_move, legal_moves_for_die, pending_moves};
