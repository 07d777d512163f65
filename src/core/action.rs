//! Moves and turn history.
//!
//! A `Move` is the complete, self-describing result of advancing one token by
//! one die: the token, the die consumed, where the token ends up, and which
//! opposing token (if any) is captured. Moves are compared structurally, and
//! each carries the roll serial it was generated for so a move kept from an
//! earlier roll can never be replayed against a later one.

use serde::{Deserialize, Serialize};

use super::player::PlayerColor;
use super::token::{TokenId, TokenStatus};

/// A legal token move for one pending die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The token being moved.
    pub token: TokenId,

    /// The die value this move consumes.
    pub die: u8,

    /// Status after the move.
    pub new_status: TokenStatus,

    /// `local_position` after the move.
    pub new_position: u8,

    /// `total_progress` after the move.
    pub new_progress: i16,

    /// Opposing token sent back to base by this move.
    pub capture: Option<TokenId>,

    /// Roll serial the move was generated under.
    pub roll: u32,
}

impl Move {
    /// The player making the move.
    #[must_use]
    pub fn player(&self) -> PlayerColor {
        self.token.owner
    }

    /// Check if this move captures an opposing token.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// Something that happened during a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The human picked a colour.
    ColorSelected,
    /// Dice were rolled.
    Rolled {
        /// The two faces.
        dice: [u8; 2],
    },
    /// A token moved.
    Moved(Move),
    /// The player passed with no legal move.
    Passed,
    /// Remaining dice were discarded because none of them could be used.
    Forfeited {
        /// The discarded dice.
        dice: Vec<u8>,
    },
}

/// A recorded event with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Post-game statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The player the event belongs to.
    pub player: PlayerColor,

    /// Turn number when the event happened.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,

    /// What happened.
    pub event: TurnEvent,
}

impl TurnRecord {
    /// Create a new turn record.
    #[must_use]
    pub fn new(player: PlayerColor, turn: u32, sequence: u32, event: TurnEvent) -> Self {
        Self {
            player,
            turn,
            sequence,
            event,
        }
    }
}
