//! Move generation and application micro-benchmarks.
//!
//! Focus:
//! - `legal_moves_into` on a fixed mid-game position
//! - `apply` along a short deterministic line of play
//! - `snapshot` + `apply` as a lookahead step

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use klondike_engine::{GameState, Move};

fn build_midgame(seed: u64) -> GameState {
    let mut game = GameState::new(seed);
    let mut moves = Vec::new();
    for i in 0usize..40 {
        game.legal_moves_into(&mut moves);
        let mv = moves[(i * 7) % moves.len()];
        let _ = game.apply_move(mv);
    }
    game
}

fn bench_legal_moves_into(c: &mut Criterion) {
    let game = build_midgame(51);
    let mut moves = Vec::<Move>::with_capacity(32);
    c.bench_function("moves.legal_moves_into", |b| {
        b.iter(|| {
            black_box(&game).legal_moves_into(&mut moves);
            black_box(moves.len());
        })
    });
}

fn bench_apply_line(c: &mut Criterion) {
    c.bench_function("moves.apply.256_steps", |b| {
        b.iter_batched(
            || (GameState::new(20260228), Vec::<Move>::with_capacity(32)),
            |(mut game, mut moves)| {
                for i in 0usize..256 {
                    if game.is_won() {
                        break;
                    }
                    game.legal_moves_into(&mut moves);
                    let mv = moves[i % moves.len()];
                    black_box(game.apply_move(mv));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_lookahead(c: &mut Criterion) {
    let game = build_midgame(777);
    let moves = game.legal_moves();
    c.bench_function("game.snapshot_apply_all", |b| {
        b.iter(|| {
            for &mv in &moves {
                let mut copy = black_box(&game).snapshot();
                black_box(copy.apply_move(mv));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_legal_moves_into,
    bench_apply_line,
    bench_lookahead
);
criterion_main!(benches);
