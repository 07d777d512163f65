//! Turn flow across seatings: rotation, colour selection, history and
//! serialization of in-progress games.

use ludo_engine::core::{
    Controller, GameConfig, GameState, Phase, PlayerColor, ScriptedDice, TurnEvent,
};
use ludo_engine::error::RuleViolation;
use ludo_engine::rules::TurnEngine;

/// Roll a dead pair and pass, returning the state handed to the next player.
fn dead_turn(engine: &TurnEngine, state: &GameState) -> GameState {
    let rolled = engine.roll_dice_with(state, [2, 5]).unwrap();
    engine.pass_turn(&rolled).unwrap()
}

#[test]
fn test_rotation_four_players() {
    let engine = TurnEngine::new(GameConfig::new());
    let mut state = engine.create_initial_state(&PlayerColor::ALL, None).unwrap();

    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push(state.current_player);
        state = dead_turn(&engine, &state);
    }

    assert_eq!(seen, [PlayerColor::ALL, PlayerColor::ALL].concat());
    assert_eq!(state.turn_number, 9);
}

#[test]
fn test_rotation_skips_unseated_colours() {
    let engine = TurnEngine::new(GameConfig::new());
    let mut state = engine
        .create_initial_state(&[PlayerColor::Blue, PlayerColor::Green], Some(PlayerColor::Blue))
        .unwrap();

    assert_eq!(state.current_player, PlayerColor::Blue);
    assert_eq!(engine.next_player(&state), PlayerColor::Green);

    state = dead_turn(&engine, &state);
    assert_eq!(state.current_player, PlayerColor::Green);
    assert_eq!(engine.next_player(&state), PlayerColor::Blue);

    state = dead_turn(&engine, &state);
    assert_eq!(state.current_player, PlayerColor::Blue);
}

#[test]
fn test_three_player_game_has_twelve_tokens() {
    let engine = TurnEngine::new(GameConfig::new());
    let state = engine
        .create_initial_state(
            &[PlayerColor::Red, PlayerColor::Yellow, PlayerColor::Blue],
            Some(PlayerColor::Yellow),
        )
        .unwrap();

    assert_eq!(state.tokens.len(), 12);
    assert_eq!(state.current_player, PlayerColor::Yellow);
    assert!(!state.is_ai_turn());
    assert_eq!(engine.next_player(&state), PlayerColor::Blue);
}

#[test]
fn test_color_selection_flow() {
    let engine = TurnEngine::new(GameConfig::new().with_color_selection());
    let state = engine
        .create_initial_state(&[PlayerColor::Red, PlayerColor::Yellow], None)
        .unwrap();

    assert_eq!(state.phase, Phase::AwaitingColorSelection);
    assert_eq!(
        engine.pass_turn(&state),
        Err(RuleViolation::WrongPhase {
            expected: Phase::AwaitingRoll,
            actual: Phase::AwaitingColorSelection,
        })
    );

    let state = engine.select_color(&state, PlayerColor::Yellow).unwrap();
    assert_eq!(state.controller_of(PlayerColor::Yellow), Some(Controller::Human));
    assert_eq!(state.controller_of(PlayerColor::Red), Some(Controller::Ai));
    assert_eq!(state.current_player, PlayerColor::Yellow);

    assert!(matches!(
        engine.select_color(&state, PlayerColor::Red),
        Err(RuleViolation::WrongPhase { .. })
    ));

    let state = dead_turn(&engine, &state);
    assert!(state.is_ai_turn());
}

#[test]
fn test_history_records_each_event() {
    let engine = TurnEngine::new(GameConfig::new());
    let state = engine
        .create_initial_state(&[PlayerColor::Red, PlayerColor::Yellow], None)
        .unwrap();
    let mut dice = ScriptedDice::new([[6, 2], [3, 4]]);

    let (_, state) = engine.roll_dice(&state, &mut dice).unwrap();
    let out = engine
        .get_all_possible_moves(&state)
        .into_iter()
        .find(|m| m.die == 6)
        .unwrap();
    let state = engine.apply_move(&state, &out).unwrap();
    let on = engine.get_all_possible_moves(&state)[0];
    let state = engine.apply_move(&state, &on).unwrap();
    let (_, state) = engine.roll_dice(&state, &mut dice).unwrap();
    let state = engine.pass_turn(&state).unwrap();

    let log: Vec<_> = state
        .history
        .iter()
        .map(|r| (r.player, r.turn, r.sequence, r.event.clone()))
        .collect();

    assert_eq!(
        log,
        vec![
            (PlayerColor::Red, 1, 0, TurnEvent::Rolled { dice: [6, 2] }),
            (PlayerColor::Red, 1, 1, TurnEvent::Moved(out)),
            (PlayerColor::Red, 1, 2, TurnEvent::Moved(on)),
            (PlayerColor::Yellow, 2, 0, TurnEvent::Rolled { dice: [3, 4] }),
            (PlayerColor::Yellow, 2, 1, TurnEvent::Passed),
        ]
    );
    assert_eq!(state.current_player, PlayerColor::Red);
    assert_eq!(state.turn_number, 3);
}

#[test]
fn test_in_progress_game_round_trips() {
    let engine = TurnEngine::new(GameConfig::new());
    let state = engine
        .create_initial_state(&[PlayerColor::Green, PlayerColor::Blue], Some(PlayerColor::Blue))
        .unwrap();
    let state = engine.roll_dice_with(&state, [6, 6]).unwrap();
    let mv = engine.get_all_possible_moves(&state)[0];
    let state = engine.apply_move(&state, &mv).unwrap();

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);

    // The restored state plays on identically.
    let next = engine.get_all_possible_moves(&restored);
    assert_eq!(next, engine.get_all_possible_moves(&state));
    assert_eq!(
        engine.apply_move(&restored, &next[0]),
        engine.apply_move(&state, &next[0])
    );
}
