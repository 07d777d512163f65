//! Game state: tokens, dice, phase and seating.
//!
//! ## GameState
//!
//! Everything needed to continue a game:
//! - Token positions for every seated player
//! - Current player, dice outcome and pending dice
//! - Phase and winner
//! - Control assignment (human or AI per seat)
//! - Turn history
//!
//! States are values. The turn engine never mutates a state it was handed;
//! each transition returns a new one. Tokens and history use `im` persistent
//! vectors so that producing the next state is cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{TurnEvent, TurnRecord};
use super::player::{Controller, PlayerColor};
use super::token::{Token, TokenId};

/// Die values not yet spent this roll. At most four (doubles).
pub type PendingDice = SmallVec<[u8; 4]>;

/// Seated colours in turn order.
pub type Seats = SmallVec<[PlayerColor; 4]>;

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the human to pick a colour.
    AwaitingColorSelection,
    /// Waiting for the current player to roll (or to pass after a dead roll).
    AwaitingRoll,
    /// Waiting for the current player to pick one of the legal moves.
    AwaitingTokenSelection,
    /// A player has won. Terminal.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::AwaitingColorSelection => "awaiting colour selection",
            Phase::AwaitingRoll => "awaiting roll",
            Phase::AwaitingTokenSelection => "awaiting token selection",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Complete game state.
///
/// Every field is serialized: `total_progress` on tokens and `pending_dice`
/// carry information that cannot be recovered from positions alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// All tokens of all seated players, grouped by player in turn order.
    pub tokens: Vector<Token>,

    /// Seated colours in turn order.
    pub active_players: Seats,

    /// Whose turn it is.
    pub current_player: PlayerColor,

    /// Faces of the most recent roll this roll-phase.
    pub rolled_values: Option<[u8; 2]>,

    /// Die values not yet consumed. Doubles expand to four equal values.
    pub pending_dice: PendingDice,

    /// Whether the most recent roll was a double.
    pub is_doubles: bool,

    /// Whether the current roll-phase has already rolled.
    pub dice_rolled: bool,

    /// Current phase.
    pub phase: Phase,

    /// Set once a player has every token on the final home slot.
    pub winner: Option<PlayerColor>,

    /// Who drives each seat.
    pub controllers: FxHashMap<PlayerColor, Controller>,

    /// Turn number (starts at 1, increments when play passes to another player).
    pub turn_number: u32,

    /// Incremented on every roll; moves carry the serial they were generated for.
    pub roll_serial: u32,

    /// Event sequence within the current turn.
    pub action_sequence: u32,

    /// Everything that happened so far.
    pub history: Vector<TurnRecord>,
}

impl GameState {
    /// Create a state with every token in its base.
    ///
    /// Seating is not validated here; use `TurnEngine::create_initial_state`.
    #[must_use]
    pub fn new(
        active_players: Seats,
        tokens_per_player: u8,
        current_player: PlayerColor,
        phase: Phase,
        controllers: FxHashMap<PlayerColor, Controller>,
    ) -> Self {
        let tokens = active_players
            .iter()
            .flat_map(|&color| {
                (0..tokens_per_player).map(move |i| Token::in_base(TokenId::new(color, i), i))
            })
            .collect();

        Self {
            tokens,
            active_players,
            current_player,
            rolled_values: None,
            pending_dice: PendingDice::new(),
            is_doubles: false,
            dice_rolled: false,
            phase,
            winner: None,
            controllers,
            turn_number: 1,
            roll_serial: 0,
            action_sequence: 0,
            history: Vector::new(),
        }
    }

    // === Tokens ===

    /// Look up a token.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Position of a token in `tokens`.
    #[must_use]
    pub fn token_index(&self, id: TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == id)
    }

    /// Iterate over a player's tokens.
    pub fn tokens_of(&self, color: PlayerColor) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(move |t| t.owner() == color)
    }

    /// Replace the token with the same id.
    ///
    /// Intended for setting up positions (puzzles, tests). Returns false if no
    /// token has that id.
    pub fn place_token(&mut self, token: Token) -> bool {
        match self.token_index(token.id) {
            Some(i) => {
                self.tokens.set(i, token);
                true
            }
            None => false,
        }
    }

    // === Seating ===

    /// Check if a colour is seated in this game.
    #[must_use]
    pub fn is_active(&self, color: PlayerColor) -> bool {
        self.active_players.contains(&color)
    }

    /// Who drives a seat, if the colour is seated.
    #[must_use]
    pub fn controller_of(&self, color: PlayerColor) -> Option<Controller> {
        self.controllers.get(&color).copied()
    }

    /// Check if the current player is AI-driven.
    #[must_use]
    pub fn is_ai_turn(&self) -> bool {
        self.controller_of(self.current_player) == Some(Controller::Ai)
    }

    // === Dice ===

    /// Distinct pending die values, in the order they were rolled.
    #[must_use]
    pub fn unique_pending_dice(&self) -> PendingDice {
        let mut unique = PendingDice::new();
        for &die in &self.pending_dice {
            if !unique.contains(&die) {
                unique.push(die);
            }
        }
        unique
    }

    /// Forget the current roll.
    pub fn clear_dice(&mut self) {
        self.rolled_values = None;
        self.pending_dice.clear();
        self.is_doubles = false;
        self.dice_rolled = false;
    }

    // === Progression ===

    /// Check if the game has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Advance to the next turn number.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Append an event for the current player to the history.
    pub fn record(&mut self, event: TurnEvent) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history.push_back(TurnRecord::new(
            self.current_player,
            self.turn_number,
            sequence,
            event,
        ));
    }
}
