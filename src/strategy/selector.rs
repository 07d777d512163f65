//! Move selectors for AI seats: the selection trait and its heuristics.

use std::cmp::Reverse;

use crate::core::{GameRng, GameState, Move, TokenStatus};

/// Policy for choosing one of the legal moves.
pub trait MoveSelector: Send + Sync {
    /// Pick a move from `moves`, the legal set for `state`.
    ///
    /// Returns the index of the chosen move, or `None` when `moves` is empty.
    fn select(&self, state: &GameState, moves: &[Move], rng: &mut GameRng) -> Option<usize>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Always plays the first legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSelector for FirstLegal {
    fn select(&self, _state: &GameState, moves: &[Move], _rng: &mut GameRng) -> Option<usize> {
        if moves.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn name(&self) -> &'static str {
        "first-legal"
    }
}

/// The classic table heuristic.
///
/// 1. Any capture (first found)
/// 2. Any move out of base (first found)
/// 3. A move into or within the home column, deepest slot first
/// 4. The track move reaching furthest
///
/// Ties keep the order the moves were offered in.
#[derive(Clone, Copy, Debug, Default)]
pub struct CapturePriority;

impl MoveSelector for CapturePriority {
    fn select(&self, state: &GameState, moves: &[Move], _rng: &mut GameRng) -> Option<usize> {
        if let Some(i) = moves.iter().position(Move::is_capture) {
            return Some(i);
        }

        let leaves_base = |mv: &Move| {
            state
                .token(mv.token)
                .is_some_and(|t| t.status == TokenStatus::Base)
        };
        if let Some(i) = moves.iter().position(leaves_base) {
            return Some(i);
        }

        moves
            .iter()
            .enumerate()
            .min_by_key(|(_, mv)| {
                let rank = match mv.new_status {
                    TokenStatus::Home => 0,
                    TokenStatus::Track => 1,
                    TokenStatus::Base => 2,
                };
                (rank, Reverse(mv.new_progress))
            })
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "capture-priority"
    }
}

/// Maximises the mover's resulting progress, preferring captures on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyProgress;

impl MoveSelector for GreedyProgress {
    fn select(&self, _state: &GameState, moves: &[Move], _rng: &mut GameRng) -> Option<usize> {
        moves
            .iter()
            .enumerate()
            .min_by_key(|(_, mv)| (Reverse(mv.new_progress), !mv.is_capture()))
            .map(|(i, _)| i)
    }

    fn name(&self) -> &'static str {
        "greedy-progress"
    }
}

/// Uniformly random legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMove;

impl MoveSelector for RandomMove {
    fn select(&self, _state: &GameState, moves: &[Move], rng: &mut GameRng) -> Option<usize> {
        if moves.is_empty() {
            return None;
        }
        Some(rng.pick(moves.len()))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerColor, Token, TokenId};
    use crate::rules::TurnEngine;

    fn red(i: u8) -> TokenId {
        TokenId::new(PlayerColor::Red, i)
    }

    fn on_track(id: TokenId, steps: u8) -> Token {
        Token {
            id,
            status: TokenStatus::Track,
            local_position: steps,
            total_progress: i16::from(steps),
        }
    }

    /// Red to move with `dice`, after `setup` has arranged the board.
    fn position(dice: [u8; 2], setup: impl FnOnce(&mut GameState)) -> (GameState, Vec<Move>) {
        let engine = TurnEngine::new(GameConfig::new());
        let mut state = engine
            .create_initial_state(&[PlayerColor::Red, PlayerColor::Yellow], None)
            .unwrap();
        setup(&mut state);
        let state = engine.roll_dice_with(&state, dice).unwrap();
        let moves = engine.get_all_possible_moves(&state);
        (state, moves)
    }

    #[test]
    fn test_empty_moves() {
        let (state, _) = position([6, 1], |_| {});
        let mut rng = GameRng::new(1);

        assert_eq!(FirstLegal.select(&state, &[], &mut rng), None);
        assert_eq!(CapturePriority.select(&state, &[], &mut rng), None);
        assert_eq!(GreedyProgress.select(&state, &[], &mut rng), None);
        assert_eq!(RandomMove.select(&state, &[], &mut rng), None);
    }

    #[test]
    fn test_capture_priority_prefers_capture() {
        let (state, moves) = position([6, 4], |s| {
            s.place_token(on_track(red(0), 6));
            // Yellow on global square 10.
            s.place_token(on_track(TokenId::new(PlayerColor::Yellow, 0), 36));
        });
        let mut rng = GameRng::new(1);

        let i = CapturePriority.select(&state, &moves, &mut rng).unwrap();
        assert!(moves[i].is_capture());
        assert_eq!(moves[i].token, red(0));
        assert_eq!(moves[i].die, 4);
    }

    #[test]
    fn test_capture_priority_leaves_base_next() {
        let (state, moves) = position([6, 2], |s| {
            s.place_token(on_track(red(0), 20));
        });
        let mut rng = GameRng::new(1);

        let i = CapturePriority.select(&state, &moves, &mut rng).unwrap();
        assert_eq!(moves[i].new_status, TokenStatus::Track);
        assert_eq!(moves[i].new_progress, 0);
    }

    #[test]
    fn test_capture_priority_prefers_home_then_distance() {
        let (state, moves) = position([3, 1], |s| {
            s.place_token(on_track(red(0), 50));
            s.place_token(on_track(red(1), 30));
        });
        let mut rng = GameRng::new(1);

        let i = CapturePriority.select(&state, &moves, &mut rng).unwrap();
        assert_eq!(moves[i].token, red(0));
        assert_eq!(moves[i].new_status, TokenStatus::Home);
        assert_eq!(moves[i].new_position, 1);

        let (state, moves) = position([3, 1], |s| {
            s.place_token(on_track(red(0), 10));
            s.place_token(on_track(red(1), 30));
        });
        let i = CapturePriority.select(&state, &moves, &mut rng).unwrap();
        assert_eq!(moves[i].token, red(1));
        assert_eq!(moves[i].new_progress, 33);
    }

    #[test]
    fn test_greedy_progress() {
        let (state, moves) = position([6, 2], |s| {
            s.place_token(on_track(red(0), 20));
        });
        let mut rng = GameRng::new(1);

        let i = GreedyProgress.select(&state, &moves, &mut rng).unwrap();
        assert_eq!(moves[i].token, red(0));
        assert_eq!(moves[i].new_progress, 26);
    }

    #[test]
    fn test_random_move_is_seeded() {
        let (state, moves) = position([6, 6], |_| {});
        assert_eq!(moves.len(), 4);

        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..16)
                .map(|_| RandomMove.select(&state, &moves, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(picks(9), picks(9));
        assert!(picks(9).iter().all(|&i| i < moves.len()));
    }
}
