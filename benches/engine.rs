//! Benchmarks for move generation, state transitions and whole games.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ludo_engine::core::{GameConfig, GameRng, GameState, PlayerColor, Token, TokenId, TokenStatus};
use ludo_engine::play::{GameRunner, RunnerConfig};
use ludo_engine::rules::TurnEngine;

/// Four players with a spread of tokens on the track, Red to choose a move.
fn busy_position(engine: &TurnEngine) -> GameState {
    let mut state = engine.create_initial_state(&PlayerColor::ALL, None).unwrap();
    for color in PlayerColor::ALL {
        for i in 0..3u8 {
            let steps = 5 + 14 * i + color.index() as u8;
            state.place_token(Token {
                id: TokenId::new(color, i),
                status: TokenStatus::Track,
                local_position: steps,
                total_progress: i16::from(steps),
            });
        }
    }
    engine.roll_dice_with(&state, [6, 4]).unwrap()
}

fn bench_move_generation(c: &mut Criterion) {
    let engine = TurnEngine::new(GameConfig::new());
    let state = busy_position(&engine);

    c.bench_function("all_possible_moves_4p", |b| {
        b.iter(|| black_box(engine.get_all_possible_moves(black_box(&state))));
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let engine = TurnEngine::new(GameConfig::new());
    let state = busy_position(&engine);
    let mv = engine.get_all_possible_moves(&state)[0];

    c.bench_function("apply_move_4p", |b| {
        b.iter(|| black_box(engine.apply_move(black_box(&state), black_box(&mv))));
    });
}

fn bench_full_game(c: &mut Criterion) {
    let runner = GameRunner::new(TurnEngine::new(GameConfig::new()), RunnerConfig::new());

    for seats in [vec![PlayerColor::Red, PlayerColor::Yellow], PlayerColor::ALL.to_vec()] {
        let state = runner.engine().create_initial_state(&seats, None).unwrap();
        let name = format!("full_game_{}p", seats.len());

        c.bench_function(&name, |b| {
            b.iter(|| {
                let record = runner.run(black_box(state.clone()), &mut GameRng::new(42));
                black_box(record)
            });
        });
    }
}

criterion_group!(benches, bench_move_generation, bench_apply_move, bench_full_game);
criterion_main!(benches);
