//! Legal move generation.
//!
//! Evaluating one token against one die value is deterministic and yields at
//! most one move:
//!
//! - **Base**: leaves on a six (or any value when the six rule is off) to the
//!   owner's start square.
//! - **Track**: advances `die` steps; crossing `track_length` steps enters the
//!   home column, which must not be overshot when exact rolls are required.
//! - **Home**: advances within the home column under the same overshoot rule.
//!   A token on the final slot never moves again.
//!
//! A move landing on a non-safe track square occupied by an opposing track
//! token carries that token as its capture target.

use crate::board::BoardTopology;
use crate::core::{
    GameConfig, GameState, Move, RuleConfig, Token, TokenId, TokenStatus, DIE_FACES,
};

/// Global track square of a token, if it is on the track.
#[must_use]
pub fn global_position(board: &BoardTopology, token: &Token) -> Option<u8> {
    match token.status {
        TokenStatus::Track => Some(board.global_square(token.owner(), token.local_position)),
        TokenStatus::Base | TokenStatus::Home => None,
    }
}

/// Opposing track token that a mover landing on `square` would capture.
fn capture_target(
    board: &BoardTopology,
    rules: &RuleConfig,
    state: &GameState,
    mover: &Token,
    square: u8,
) -> Option<TokenId> {
    if !rules.capture_sends_to_base || board.is_safe(square) {
        return None;
    }

    state
        .tokens
        .iter()
        .filter(|other| other.owner() != mover.owner())
        .filter(|other| global_position(board, other) == Some(square))
        .map(|other| other.id)
        .last()
}

/// The move `token` makes with `die`, if any.
fn move_for_token(config: &GameConfig, state: &GameState, token: &Token, die: u8) -> Option<Move> {
    let board = &config.board;
    let rules = &config.rules;
    let track_length = i16::from(board.track_length());
    let final_slot = board.final_home_slot();
    let owner = token.owner();

    let landing = |new_status, new_position: u8, new_progress: i16, capture| Move {
        token: token.id,
        die,
        new_status,
        new_position,
        new_progress,
        capture,
        roll: state.roll_serial,
    };
    let home_slot = |slot: u8| landing(TokenStatus::Home, slot, track_length + i16::from(slot), None);

    match token.status {
        TokenStatus::Base => {
            if rules.six_required_to_move_out && die != DIE_FACES {
                return None;
            }
            let start = board.start_offset(owner);
            let capture = capture_target(board, rules, state, token, start);
            Some(landing(TokenStatus::Track, 0, 0, capture))
        }
        TokenStatus::Track => {
            let new_total = token.total_progress + i16::from(die);
            if new_total < track_length {
                let steps = new_total as u8;
                let square = board.global_square(owner, steps);
                let capture = capture_target(board, rules, state, token, square);
                return Some(landing(TokenStatus::Track, steps, new_total, capture));
            }

            let steps_into_home = new_total - track_length;
            if steps_into_home <= i16::from(final_slot) {
                Some(home_slot(steps_into_home as u8))
            } else if !rules.exact_roll_required {
                Some(home_slot(final_slot))
            } else {
                None
            }
        }
        TokenStatus::Home => {
            if token.local_position >= final_slot {
                return None;
            }
            let new_local = u16::from(token.local_position) + u16::from(die);
            if new_local <= u16::from(final_slot) {
                Some(home_slot(new_local as u8))
            } else if !rules.exact_roll_required {
                Some(home_slot(final_slot))
            } else {
                None
            }
        }
    }
}

/// Legal moves for one token and one die value.
///
/// Empty when the token is unknown, belongs to someone other than the current
/// player, or cannot move with this die. Never more than one element.
#[must_use]
pub fn legal_moves_for_die(
    config: &GameConfig,
    state: &GameState,
    token_id: TokenId,
    die: u8,
) -> Vec<Move> {
    if !(1..=DIE_FACES).contains(&die) {
        return Vec::new();
    }

    state
        .token(token_id)
        .filter(|token| token.owner() == state.current_player)
        .and_then(|token| move_for_token(config, state, token, die))
        .into_iter()
        .collect()
}

/// Every legal move of the current player over all distinct pending dice.
///
/// Ignores the phase; the turn engine decides when this set is offered.
#[must_use]
pub fn pending_moves(config: &GameConfig, state: &GameState) -> Vec<Move> {
    let dice = state.unique_pending_dice();
    let final_slot = config.board.final_home_slot();

    state
        .tokens_of(state.current_player)
        .filter(|token| !(token.status == TokenStatus::Home && token.local_position >= final_slot))
        .flat_map(|token| {
            dice.iter()
                .filter_map(move |&die| move_for_token(config, state, token, die))
        })
        .collect()
}

/// Check if any distinct pending die moves any of the current player's tokens.
#[must_use]
pub fn has_pending_move(config: &GameConfig, state: &GameState) -> bool {
    if state.pending_dice.is_empty() {
        return false;
    }

    let dice = state.unique_pending_dice();
    state.tokens_of(state.current_player).any(|token| {
        dice.iter()
            .any(|&die| move_for_token(config, state, token, die).is_some())
    })
}
