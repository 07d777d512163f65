//! Plays a game to completion with one move selector per seat.
//!
//! The runner drives every seat, human-controlled ones included; control
//! assignment only tells a front end whose input to wait for.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{DiceSource, GameRng, GameState, Phase, PlayerColor, PlayerMap};
use crate::error::RuleResult;
use crate::rules::TurnEngine;
use crate::strategy::{CapturePriority, MoveSelector};

/// Configuration for the game runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Maximum engine transitions per game (rolls, moves, passes).
    pub max_actions: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_actions: 10_000 }
    }
}

impl RunnerConfig {
    /// Create a new runner config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition budget per game.
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }
}

/// Outcome of one played game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// The winner, or `None` if the action budget ran out first.
    pub winner: Option<PlayerColor>,

    /// Transitions applied.
    pub actions: usize,

    /// State the game stopped in.
    pub final_state: GameState,
}

impl GameRecord {
    /// Check if the game reached a winner.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }
}

/// Drives a `TurnEngine` with per-seat selectors.
pub struct GameRunner {
    engine: TurnEngine,
    selectors: PlayerMap<Box<dyn MoveSelector>>,
    config: RunnerConfig,
}

impl GameRunner {
    /// Create a runner where every seat plays `CapturePriority`.
    pub fn new(engine: TurnEngine, config: RunnerConfig) -> Self {
        Self {
            engine,
            selectors: PlayerMap::new(|_| Box::new(CapturePriority) as Box<dyn MoveSelector>),
            config,
        }
    }

    /// Use `selector` for `color`'s seat.
    pub fn with_selector(mut self, color: PlayerColor, selector: Box<dyn MoveSelector>) -> Self {
        self.selectors[color] = selector;
        self
    }

    /// Get the engine.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Play from `state` with dice drawn from `rng`.
    pub fn run(&self, state: GameState, rng: &mut GameRng) -> RuleResult<GameRecord> {
        let mut dice = rng.fork();
        self.run_with_dice(state, &mut dice, rng)
    }

    /// Play from `state` with an explicit dice source.
    ///
    /// `rng` only feeds the selectors. A game waiting for colour selection
    /// seats the human at the first active colour.
    pub fn run_with_dice(
        &self,
        mut state: GameState,
        dice: &mut dyn DiceSource,
        rng: &mut GameRng,
    ) -> RuleResult<GameRecord> {
        let mut actions = 0;

        while actions < self.config.max_actions {
            state = match state.phase {
                Phase::GameOver => break,
                Phase::AwaitingColorSelection => {
                    let color = state.active_players[0];
                    self.engine.select_color(&state, color)?
                }
                Phase::AwaitingRoll if !state.dice_rolled => {
                    self.engine.roll_dice(&state, dice)?.1
                }
                Phase::AwaitingRoll => self.engine.pass_turn(&state)?,
                Phase::AwaitingTokenSelection => {
                    let moves = self.engine.get_all_possible_moves(&state);
                    let selector = &self.selectors[state.current_player];
                    match selector
                        .select(&state, &moves, rng)
                        .and_then(|i| moves.get(i))
                    {
                        Some(mv) => self.engine.apply_move(&state, mv)?,
                        None => self.engine.pass_turn(&state)?,
                    }
                }
            };
            actions += 1;
        }

        let winner = state.winner;
        match winner {
            Some(color) => info!(winner = %color, actions, "game finished"),
            None => debug!(actions, "action budget exhausted"),
        }

        Ok(GameRecord {
            winner,
            actions,
            final_state: state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, ScriptedDice};
    use crate::strategy::{FirstLegal, RandomMove};

    fn two_player() -> (GameRunner, GameState) {
        let engine = TurnEngine::new(GameConfig::new());
        let state = engine
            .create_initial_state(&[PlayerColor::Red, PlayerColor::Yellow], None)
            .unwrap();
        (GameRunner::new(engine, RunnerConfig::new()), state)
    }

    #[test]
    fn test_game_reaches_winner() {
        let (runner, state) = two_player();
        let mut rng = GameRng::new(42);

        let record = runner.run(state, &mut rng).unwrap();

        assert!(record.is_finished());
        assert_eq!(record.final_state.phase, Phase::GameOver);
        assert_eq!(record.final_state.winner, record.winner);
        assert!(record.actions > 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let (runner, state) = two_player();
        let runner = runner.with_selector(PlayerColor::Yellow, Box::new(RandomMove));

        let first = runner.run(state.clone(), &mut GameRng::new(7)).unwrap();
        let second = runner.run(state, &mut GameRng::new(7)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_budget_stops_game() {
        let (runner, state) = two_player();
        let runner = GameRunner {
            config: RunnerConfig::new().with_max_actions(3),
            ..runner
        };

        let record = runner.run(state, &mut GameRng::new(1)).unwrap();

        assert_eq!(record.actions, 3);
        assert_eq!(record.winner, None);
    }

    #[test]
    fn test_scripted_dead_rolls_pass() {
        let (runner, state) = two_player();
        let runner = runner.with_selector(PlayerColor::Red, Box::new(FirstLegal));
        let runner = GameRunner {
            config: RunnerConfig::new().with_max_actions(4),
            ..runner
        };
        let mut dice = ScriptedDice::new([[2, 5], [1, 3]]);

        let record = runner
            .run_with_dice(state, &mut dice, &mut GameRng::new(0))
            .unwrap();

        // Roll and pass for each player: play returns to Red.
        assert_eq!(record.final_state.current_player, PlayerColor::Red);
        assert_eq!(record.final_state.turn_number, 3);
        assert_eq!(record.final_state.history.len(), 4);
    }
}
