//! # ludo-engine
//!
//! A rule engine for Ludo with two dice, for 2 to 4 players.
//!
//! ## Design Principles
//!
//! 1. **States are values**: Every transition borrows a `GameState` and
//!    returns a new one. Rejected operations return a `RuleViolation` and
//!    leave the caller's state as it was.
//!
//! 2. **Rules are configuration**: Home-entry strictness, the six-to-leave
//!    rule, the doubles bonus, captures and board dimensions are all set on
//!    `GameConfig`.
//!
//! 3. **Deterministic**: Dice come from a `DiceSource`. The same seed (or
//!    script) replays the same game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so keeping
//!   every intermediate state around is cheap.
//!
//! - **Stale Move Detection**: Moves carry the roll they were generated for
//!   and are rejected once that roll is gone.
//!
//! ## Modules
//!
//! - `core`: Players, tokens, moves, state, dice and configuration
//! - `board`: Track geometry, start squares and safe squares
//! - `rules`: Move generation, the turn engine and state invariants
//! - `strategy`: Move selectors for AI seats
//! - `play`: Running whole games between selectors
//! - `error`: Rejections returned by the engine
//!
//! ```
//! use ludo_engine::{GameConfig, Phase, PlayerColor, TurnEngine};
//!
//! let engine = TurnEngine::new(GameConfig::new());
//! let state = engine
//!     .create_initial_state(&[PlayerColor::Red, PlayerColor::Yellow], Some(PlayerColor::Red))
//!     .unwrap();
//!
//! let state = engine.roll_dice_with(&state, [6, 3]).unwrap();
//! assert_eq!(state.phase, Phase::AwaitingTokenSelection);
//!
//! let moves = engine.get_all_possible_moves(&state);
//! let state = engine.apply_move(&state, &moves[0]).unwrap();
//! assert_eq!(state.pending_dice.as_slice(), &[3]);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod strategy;
pub mod play;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Controller, PlayerColor, PlayerMap,
    Token, TokenId, TokenStatus, BASE_SENTINEL,
    DiceSource, GameRng, GameRngState, ScriptedDice, DIE_FACES,
    GameConfig, RuleConfig,
    Move, TurnEvent, TurnRecord,
    GameState, PendingDice, Phase, Seats,
};

pub use crate::board::{BoardError, BoardTopology, SAFE_SQUARE_OFFSET};

pub use crate::rules::{check_invariants, InvariantViolation, TurnEngine};

pub use crate::strategy::{CapturePriority, FirstLegal, GreedyProgress, MoveSelector, RandomMove};

pub use crate::play::{GameRecord, GameRunner, RunnerConfig};

pub use crate::error::{RuleResult, RuleViolation};
