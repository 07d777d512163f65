//! Turn engine: the state machine driving a game.
//!
//! ```text
//! AwaitingColorSelection -> AwaitingRoll -> AwaitingTokenSelection -> ...
//!                               ^   |              |     ^   |
//!                               |   +- dead roll --+     +---+ more dice
//!                               +--- dice spent / pass --+
//!                                                        +-> GameOver
//! ```
//!
//! Every transition borrows the current state and returns a new one. A
//! rejected transition returns a `RuleViolation` and the caller keeps using
//! the state it already holds, so partial application is never observable.
//!
//! ## Dice
//!
//! Two dice are rolled per roll-phase. Doubles expand to four pending uses of
//! the same face and, once spent, give the same player another roll-phase.
//! Otherwise the two faces are pending and the turn passes on when they are
//! spent. Dice that no token can use are discarded.

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, instrument, trace};

use crate::core::{
    Controller, DiceSource, GameConfig, GameState, Move, Phase, PlayerColor, Seats, TokenId,
    TokenStatus, TurnEvent, DIE_FACES,
};
use crate::error::{RuleResult, RuleViolation};

use super::invariants::check_invariants;
use super::movegen;

fn rejected(err: RuleViolation) -> RuleViolation {
    trace!(error = %err, "operation rejected");
    err
}

/// Applies the rules of one game configuration to game states.
///
/// The engine holds only configuration. Any number of independent games can
/// share one engine.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine {
    config: GameConfig,
}

impl TurnEngine {
    /// Create an engine for a configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // === Setup ===

    /// Build the starting state with every token in base.
    ///
    /// `active_players` must name 2 to 4 distinct colours; turn order is
    /// canonical colour order. With a human colour, that colour is
    /// human-controlled, the others AI, and the human rolls first. Without
    /// one, the game either waits for colour selection (if configured) or
    /// seats every colour as AI with the first colour to roll.
    pub fn create_initial_state(
        &self,
        active_players: &[PlayerColor],
        human: Option<PlayerColor>,
    ) -> RuleResult<GameState> {
        let seats = Self::seat(active_players)?;

        let (current, phase) = match human {
            Some(color) if !seats.contains(&color) => {
                return Err(rejected(RuleViolation::ColorNotActive(color)));
            }
            Some(color) => (color, Phase::AwaitingRoll),
            None if self.config.require_color_selection => {
                (seats[0], Phase::AwaitingColorSelection)
            }
            None => (seats[0], Phase::AwaitingRoll),
        };

        let controllers = Self::controllers(&seats, human);
        let state = GameState::new(
            seats,
            self.config.tokens_per_player,
            current,
            phase,
            controllers,
        );

        debug!(players = ?state.active_players, ?human, ?phase, "game created");
        self.debug_check(&state);
        Ok(state)
    }

    fn seat(active_players: &[PlayerColor]) -> RuleResult<Seats> {
        if !(2..=PlayerColor::COUNT).contains(&active_players.len()) {
            return Err(rejected(RuleViolation::InvalidSeating(
                "a game needs 2 to 4 players",
            )));
        }

        let mut seats: Seats = active_players.iter().copied().collect();
        seats.sort_unstable();
        seats.dedup();
        if seats.len() != active_players.len() {
            return Err(rejected(RuleViolation::InvalidSeating(
                "a colour was seated twice",
            )));
        }
        Ok(seats)
    }

    fn controllers(
        seats: &Seats,
        human: Option<PlayerColor>,
    ) -> FxHashMap<PlayerColor, Controller> {
        seats
            .iter()
            .map(|&color| {
                let controller = if Some(color) == human {
                    Controller::Human
                } else {
                    Controller::Ai
                };
                (color, controller)
            })
            .collect()
    }

    /// Seat the human at `color`; every other seat is AI. The human rolls first.
    #[instrument(level = "debug", skip(self, state))]
    pub fn select_color(&self, state: &GameState, color: PlayerColor) -> RuleResult<GameState> {
        self.expect_phase(state, Phase::AwaitingColorSelection)?;
        if !state.is_active(color) {
            return Err(rejected(RuleViolation::ColorNotActive(color)));
        }

        let mut next = state.clone();
        next.controllers = Self::controllers(&state.active_players, Some(color));
        next.current_player = color;
        next.phase = Phase::AwaitingRoll;
        next.record(TurnEvent::ColorSelected);

        self.debug_check(&next);
        Ok(next)
    }

    // === Dice ===

    /// Roll both dice from `dice` and apply the result.
    ///
    /// Only valid while awaiting a roll that has not happened yet this
    /// roll-phase. No dice are consumed from `dice` on rejection.
    pub fn roll_dice<D: DiceSource + ?Sized>(
        &self,
        state: &GameState,
        dice: &mut D,
    ) -> RuleResult<([u8; 2], GameState)> {
        self.check_can_roll(state)?;
        let faces = dice.roll_pair();
        let next = self.roll_dice_with(state, faces)?;
        Ok((faces, next))
    }

    /// Apply an explicit roll.
    ///
    /// If the current player can use any of the dice the game moves to token
    /// selection. Otherwise it stays awaiting a roll with the dice spent, and
    /// the player must pass.
    #[instrument(level = "debug", skip(self, state), fields(player = %state.current_player))]
    pub fn roll_dice_with(&self, state: &GameState, faces: [u8; 2]) -> RuleResult<GameState> {
        self.check_can_roll(state)?;
        if let Some(&bad) = faces.iter().find(|f| !(1..=DIE_FACES).contains(*f)) {
            return Err(rejected(RuleViolation::InvalidDieFace(bad)));
        }

        let [a, b] = faces;
        let is_doubles = a == b;

        let mut next = state.clone();
        next.roll_serial += 1;
        next.rolled_values = Some(faces);
        next.is_doubles = is_doubles;
        next.pending_dice = if is_doubles {
            smallvec![a; 4]
        } else {
            smallvec![a, b]
        };
        next.dice_rolled = true;
        next.record(TurnEvent::Rolled { dice: faces });

        if movegen::has_pending_move(&self.config, &next) {
            next.phase = Phase::AwaitingTokenSelection;
            debug!(?faces, is_doubles, "rolled");
        } else {
            debug!(?faces, is_doubles, "rolled with no legal move");
        }

        self.debug_check(&next);
        Ok(next)
    }

    fn check_can_roll(&self, state: &GameState) -> RuleResult<()> {
        self.expect_phase(state, Phase::AwaitingRoll)?;
        if state.dice_rolled {
            return Err(rejected(RuleViolation::AlreadyRolled));
        }
        Ok(())
    }

    // === Queries ===

    /// Legal moves for one of the current player's tokens and one die value.
    #[must_use]
    pub fn legal_moves_for_die(&self, state: &GameState, token: TokenId, die: u8) -> Vec<Move> {
        movegen::legal_moves_for_die(&self.config, state, token, die)
    }

    /// Every move the current player may choose now.
    ///
    /// Empty outside token selection.
    #[must_use]
    pub fn get_all_possible_moves(&self, state: &GameState) -> Vec<Move> {
        if state.phase != Phase::AwaitingTokenSelection {
            return Vec::new();
        }
        movegen::pending_moves(&self.config, state)
    }

    /// Check if any pending die moves any of the current player's tokens.
    #[must_use]
    pub fn player_has_any_move(&self, state: &GameState) -> bool {
        !state.is_game_over() && movegen::has_pending_move(&self.config, state)
    }

    /// Check if `pass_turn` would be accepted.
    #[must_use]
    pub fn can_pass(&self, state: &GameState) -> bool {
        let rolled = match state.phase {
            Phase::AwaitingRoll => state.dice_rolled,
            Phase::AwaitingTokenSelection => true,
            Phase::AwaitingColorSelection | Phase::GameOver => false,
        };
        rolled && !self.player_has_any_move(state)
    }

    /// The seated player after the current one, wrapping around.
    #[must_use]
    pub fn next_player(&self, state: &GameState) -> PlayerColor {
        let seats = &state.active_players;
        match seats.iter().position(|&c| c == state.current_player) {
            Some(i) => seats[(i + 1) % seats.len()],
            None => state.current_player,
        }
    }

    // === Transitions ===

    /// Apply one of the moves offered by `get_all_possible_moves`.
    ///
    /// Consumes the move's die, resolves its capture and checks for a win.
    /// The same player continues while any remaining die can be used;
    /// otherwise the remaining dice are discarded and the roll-phase ends.
    #[instrument(level = "debug", skip(self, state), fields(player = %state.current_player))]
    pub fn apply_move(&self, state: &GameState, mv: &Move) -> RuleResult<GameState> {
        self.expect_phase(state, Phase::AwaitingTokenSelection)?;
        if mv.player() != state.current_player {
            return Err(rejected(RuleViolation::NotActivePlayer {
                player: mv.player(),
                current: state.current_player,
            }));
        }
        let Some(index) = state.token_index(mv.token) else {
            return Err(rejected(RuleViolation::UnknownToken(mv.token)));
        };
        if mv.roll != state.roll_serial {
            return Err(rejected(RuleViolation::StaleMove {
                roll: mv.roll,
                current: state.roll_serial,
            }));
        }
        let Some(die_index) = state.pending_dice.iter().position(|&d| d == mv.die) else {
            return Err(rejected(RuleViolation::DieNotPending(mv.die)));
        };
        if !self
            .legal_moves_for_die(state, mv.token, mv.die)
            .contains(mv)
        {
            return Err(rejected(RuleViolation::IllegalMove));
        }

        let mut next = state.clone();

        let mut token = next.tokens[index];
        token.status = mv.new_status;
        token.local_position = mv.new_position;
        token.total_progress = mv.new_progress;
        next.tokens.set(index, token);

        next.pending_dice.remove(die_index);

        if let Some(target) = mv.capture {
            self.send_to_base(&mut next, target);
        }

        next.record(TurnEvent::Moved(*mv));

        if self.has_won(&next, next.current_player) {
            next.phase = Phase::GameOver;
            next.winner = Some(next.current_player);
            debug!(winner = %next.current_player, "game over");
            self.debug_check(&next);
            return Ok(next);
        }

        if !next.pending_dice.is_empty() {
            if movegen::has_pending_move(&self.config, &next) {
                self.debug_check(&next);
                return Ok(next);
            }
            let dice = next.pending_dice.to_vec();
            debug!(?dice, "no legal move for remaining dice");
            next.record(TurnEvent::Forfeited { dice });
            next.pending_dice.clear();
        }

        self.end_roll_phase(&mut next);
        self.debug_check(&next);
        Ok(next)
    }

    /// Give up the rest of the roll when no legal move exists.
    ///
    /// Rejected before rolling and whenever a legal move is available.
    #[instrument(level = "debug", skip(self, state), fields(player = %state.current_player))]
    pub fn pass_turn(&self, state: &GameState) -> RuleResult<GameState> {
        match state.phase {
            Phase::GameOver => return Err(rejected(RuleViolation::GameOver)),
            Phase::AwaitingRoll if !state.dice_rolled => {
                return Err(rejected(RuleViolation::NotRolled));
            }
            Phase::AwaitingRoll | Phase::AwaitingTokenSelection => {}
            Phase::AwaitingColorSelection => {
                return Err(rejected(RuleViolation::WrongPhase {
                    expected: Phase::AwaitingRoll,
                    actual: state.phase,
                }));
            }
        }
        if movegen::has_pending_move(&self.config, state) {
            return Err(rejected(RuleViolation::MovesAvailable));
        }

        let mut next = state.clone();
        next.record(TurnEvent::Passed);
        self.end_roll_phase(&mut next);

        self.debug_check(&next);
        Ok(next)
    }

    // === Internals ===

    fn expect_phase(&self, state: &GameState, expected: Phase) -> RuleResult<()> {
        if state.phase == Phase::GameOver {
            return Err(rejected(RuleViolation::GameOver));
        }
        if state.phase != expected {
            return Err(rejected(RuleViolation::WrongPhase {
                expected,
                actual: state.phase,
            }));
        }
        Ok(())
    }

    /// Lowest base slot of `owner` not holding a token.
    fn free_base_slot(&self, state: &GameState, owner: PlayerColor) -> u8 {
        let occupied: SmallVec<[u8; 4]> = state
            .tokens_of(owner)
            .filter(|t| t.status == TokenStatus::Base)
            .map(|t| t.local_position)
            .collect();
        (0..self.config.tokens_per_player)
            .find(|slot| !occupied.contains(slot))
            .unwrap_or(0)
    }

    fn send_to_base(&self, state: &mut GameState, target: TokenId) {
        let Some(index) = state.token_index(target) else {
            return;
        };
        let slot = self.free_base_slot(state, target.owner);
        let mut token = state.tokens[index];
        token.send_to_base(slot);
        state.tokens.set(index, token);
        debug!(captured = %target, slot, "token sent back to base");
    }

    fn has_won(&self, state: &GameState, color: PlayerColor) -> bool {
        let home_length = self.config.board.home_column_length();
        state.tokens_of(color).all(|t| t.is_finished(home_length))
    }

    /// Close the roll-phase: doubles roll again, anything else hands over.
    fn end_roll_phase(&self, state: &mut GameState) {
        let extra_roll = state.is_doubles && self.config.rules.doubles_grant_extra_roll;
        state.clear_dice();
        state.phase = Phase::AwaitingRoll;

        if extra_roll {
            debug!(player = %state.current_player, "doubles: rolling again");
        } else {
            let next = self.next_player(state);
            state.current_player = next;
            state.advance_turn();
            debug!(player = %next, turn = state.turn_number, "turn passes");
        }
    }

    fn debug_check(&self, state: &GameState) {
        if cfg!(debug_assertions) {
            let violations = check_invariants(&self.config, state);
            assert!(
                violations.is_empty(),
                "engine produced an unsound state: {violations:?}"
            );
        }
    }
}
