//! State invariants - sanity checks that detect engine bugs.
//!
//! These should NEVER trigger for a state produced by the turn engine. They
//! are not gameplay rejections; a violation means a transition is wrong.

use thiserror::Error;

use crate::core::{GameConfig, GameState, Phase, TokenStatus, BASE_SENTINEL, DIE_FACES};

/// Invariant violation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check all state invariants.
///
/// Returns every violation found, or an empty list if the state is sound.
#[must_use]
pub fn check_invariants(config: &GameConfig, state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let board = &config.board;
    let track_length = board.track_length();
    let home_length = board.home_column_length();

    let expected_tokens = usize::from(config.tokens_per_player) * state.active_players.len();
    if state.tokens.len() != expected_tokens {
        violations.push(InvariantViolation::new(format!(
            "{} tokens for {} players, expected {}",
            state.tokens.len(),
            state.active_players.len(),
            expected_tokens
        )));
    }

    if !state.is_active(state.current_player) {
        violations.push(InvariantViolation::new(format!(
            "current player {} is not seated",
            state.current_player
        )));
    }

    for token in &state.tokens {
        if !state.is_active(token.owner()) {
            violations.push(InvariantViolation::new(format!(
                "token {} belongs to an unseated player",
                token.id
            )));
        }

        let consistent = match token.status {
            TokenStatus::Base => {
                token.local_position < config.tokens_per_player
                    && token.total_progress == BASE_SENTINEL
            }
            TokenStatus::Track => {
                token.local_position < track_length
                    && token.total_progress == i16::from(token.local_position)
            }
            TokenStatus::Home => {
                token.local_position < home_length
                    && token.total_progress
                        == i16::from(track_length) + i16::from(token.local_position)
            }
        };
        if !consistent {
            violations.push(InvariantViolation::new(format!(
                "token {} has inconsistent position: {:?} at {} with progress {}",
                token.id, token.status, token.local_position, token.total_progress
            )));
        }
    }

    for &color in &state.active_players {
        let mut slots: Vec<u8> = state
            .tokens_of(color)
            .filter(|t| t.status == TokenStatus::Base)
            .map(|t| t.local_position)
            .collect();
        let occupied = slots.len();
        slots.sort_unstable();
        slots.dedup();
        if slots.len() != occupied {
            violations.push(InvariantViolation::new(format!(
                "{color} has two tokens in the same base slot"
            )));
        }
    }

    if state.pending_dice.len() > 4 {
        violations.push(InvariantViolation::new(format!(
            "{} pending dice",
            state.pending_dice.len()
        )));
    }
    if let Some(&die) = state
        .pending_dice
        .iter()
        .find(|&&d| !(1..=DIE_FACES).contains(&d))
    {
        violations.push(InvariantViolation::new(format!("pending die {die} out of range")));
    }

    if state.phase == Phase::AwaitingTokenSelection && state.pending_dice.is_empty() {
        violations.push(InvariantViolation::new(
            "awaiting token selection with no pending dice",
        ));
    }

    match (state.phase, state.winner) {
        (Phase::GameOver, Some(winner)) => {
            let all_done = state
                .tokens_of(winner)
                .all(|t| t.is_finished(home_length));
            if !all_done {
                violations.push(InvariantViolation::new(format!(
                    "{winner} won with tokens still travelling"
                )));
            }
        }
        (Phase::GameOver, None) => {
            violations.push(InvariantViolation::new("game over without a winner"));
        }
        (_, Some(winner)) => {
            violations.push(InvariantViolation::new(format!(
                "{winner} recorded as winner while game continues"
            )));
        }
        (_, None) => {}
    }

    violations
}
