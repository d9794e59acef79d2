//! Search and move generation benchmarks.
//!
//! Run with `cargo bench`.

use std::hint::black_box;
use std::sync::atomic::AtomicBool;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use damista::board::{Cell, Color, Position};
use damista::eval;
use damista::game::GameState;
use damista::movegen;
use damista::search::best_move;

fn capture_heavy() -> GameState {
    let mut state = GameState::standard();
    state.clear_board();
    state.place(Position::new(5, 2), Cell::RedMan);
    state.place(Position::new(5, 6), Cell::RedMan);
    state.place(Position::new(6, 3), Cell::RedKing);
    state.place(Position::new(4, 1), Cell::BlackMan);
    state.place(Position::new(4, 3), Cell::BlackMan);
    state.place(Position::new(4, 5), Cell::BlackMan);
    state.place(Position::new(2, 3), Cell::BlackMan);
    state.place(Position::new(2, 5), Cell::BlackKing);
    state
}

fn bench_search_depth(c: &mut Criterion) {
    let opening = GameState::standard();
    let cancel = AtomicBool::new(false);

    let mut group = c.benchmark_group("search");
    for depth in [3u8, 5, 6] {
        group.bench_with_input(BenchmarkId::new("opening", depth), &depth, |b, &depth| {
            b.iter(|| black_box(best_move(&opening, depth, &cancel, None)));
        });
    }
    let tactical = capture_heavy();
    group.bench_function("capture_heavy_d6", |b| {
        b.iter(|| black_box(best_move(&tactical, 6, &cancel, None)));
    });
    group.finish();
}

fn bench_move_generation(c: &mut Criterion) {
    let opening = GameState::standard();
    let tactical = capture_heavy();

    let mut group = c.benchmark_group("movegen");
    group.bench_function("opening", |b| {
        b.iter(|| black_box(movegen::legal_moves(&opening, Color::Red)));
    });
    group.bench_function("capture_heavy", |b| {
        b.iter(|| black_box(movegen::legal_moves(&tactical, Color::Red)));
    });
    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let opening = GameState::standard();
    c.bench_function("evaluate_opening", |b| {
        b.iter(|| black_box(eval::evaluate(&opening)));
    });
}

criterion_group!(
    benches,
    bench_search_depth,
    bench_move_generation,
    bench_evaluation
);
criterion_main!(benches);
