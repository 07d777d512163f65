//! Rejections returned by the turn engine.
//!
//! Every variant is an expected, recoverable condition: a UI clicked at the
//! wrong moment, a move object outlived its roll, or a caller acted for the
//! wrong seat. The state passed to the rejected call is left untouched.

use thiserror::Error;

use crate::core::{Phase, PlayerColor, TokenId};

/// Why the engine refused an operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("operation requires phase {expected}, game is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("game is over")]
    GameOver,

    #[error("dice already rolled this roll-phase")]
    AlreadyRolled,

    #[error("dice have not been rolled")]
    NotRolled,

    #[error("die face {0} is outside 1..=6")]
    InvalidDieFace(u8),

    #[error("{player} acted but it is {current}'s turn")]
    NotActivePlayer {
        player: PlayerColor,
        current: PlayerColor,
    },

    #[error("no token {0} in this game")]
    UnknownToken(TokenId),

    #[error("die value {0} is not pending")]
    DieNotPending(u8),

    #[error("move was generated for roll {roll}, current roll is {current}")]
    StaleMove { roll: u32, current: u32 },

    #[error("move is not in the current legal set")]
    IllegalMove,

    #[error("cannot pass while a legal move exists")]
    MovesAvailable,

    #[error("invalid seating: {0}")]
    InvalidSeating(&'static str),

    #[error("{0} is not seated in this game")]
    ColorNotActive(PlayerColor),
}

/// Why a board description was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("track must have at least one square")]
    EmptyTrack,

    #[error("track length {0} does not split into four equal arms")]
    UnevenArms(u8),

    #[error("home column must have at least one slot")]
    EmptyHomeColumn,
}

/// Result type for engine transitions.
pub type RuleResult<T> = Result<T, RuleViolation>;
