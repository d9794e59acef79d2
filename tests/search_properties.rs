//! Search invariants checked against a plain unpruned minimax.

use std::sync::atomic::AtomicBool;

use damista::board::{Cell, Color, Position};
use damista::eval;
use damista::game::GameState;
use damista::movegen;
use damista::rules;
use damista::search::best_move;

fn pos(row: i8, col: i8) -> Position {
    Position::new(row, col)
}

/// Reference valuation: full-width minimax, no pruning, no shuffling.
fn plain_minimax(state: &GameState, depth: u8) -> i32 {
    if depth == 0 || rules::game_ended(state) {
        return eval::evaluate(state);
    }
    let maximizing = state.turn() == Color::Black;
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for mv in movegen::legal_moves(state, state.turn()) {
        let mut child = state.clone();
        let applied = rules::apply_move(&mut child, mv.from, mv.to);
        if !applied.continues {
            rules::change_turn(&mut child, 0);
        }
        let value = plain_minimax(&child, depth - 1);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }
    best
}

fn midgame() -> GameState {
    let mut state = GameState::standard();
    state.clear_board();
    state.place(pos(5, 2), Cell::RedMan);
    state.place(pos(6, 5), Cell::RedMan);
    state.place(pos(4, 7), Cell::RedKing);
    state.place(pos(2, 1), Cell::BlackMan);
    state.place(pos(2, 5), Cell::BlackMan);
    state.place(pos(1, 4), Cell::BlackKing);
    state
}

#[test]
fn pruning_preserves_the_minimax_value_from_the_opening() {
    let state = GameState::standard();
    let cancel = AtomicBool::new(false);
    for depth in 1..=4 {
        let (_, score) = best_move(&state, depth, &cancel, None).expect("opening has moves");
        assert_eq!(
            score,
            plain_minimax(&state, depth),
            "depth {depth} value diverged"
        );
    }
}

#[test]
fn pruning_preserves_the_minimax_value_in_a_midgame() {
    for color in [Color::Red, Color::Black] {
        let mut state = midgame();
        state.set_turn(color);
        let cancel = AtomicBool::new(false);
        let (_, score) = best_move(&state, 4, &cancel, None).expect("moves exist");
        assert_eq!(score, plain_minimax(&state, 4), "{color} to move diverged");
    }
}

#[test]
fn search_agrees_with_plain_argmax() {
    let state = midgame();
    let cancel = AtomicBool::new(false);
    let (mv, _) = best_move(&state, 3, &cancel, None).expect("moves exist");

    let mut expected = None;
    let mut expected_value = i32::MAX;
    for candidate in movegen::legal_moves(&state, state.turn()) {
        let mut child = state.clone();
        let applied = rules::apply_move(&mut child, candidate.from, candidate.to);
        if !applied.continues {
            rules::change_turn(&mut child, 0);
        }
        // Red minimizes.
        let value = plain_minimax(&child, 2);
        if value < expected_value {
            expected_value = value;
            expected = Some(candidate);
        }
    }
    assert_eq!(Some(mv), expected);
}

#[test]
fn search_respects_a_capture_chain_in_progress() {
    let mut state = GameState::standard();
    state.clear_board();
    state.place(pos(5, 2), Cell::RedMan);
    state.place(pos(4, 3), Cell::BlackMan);
    state.place(pos(2, 5), Cell::BlackMan);
    state.place(pos(0, 7), Cell::BlackMan);
    let applied = rules::apply_move(&mut state, pos(5, 2), pos(3, 4));
    assert!(applied.continues);

    let cancel = AtomicBool::new(false);
    let (mv, _) = best_move(&state, 4, &cancel, None).expect("chain jump available");
    assert_eq!(mv.from, pos(3, 4));
    assert!(mv.is_jump());
}

#[test]
fn search_prefers_the_winning_capture() {
    // Black to move; taking the last red piece ends the game.
    let mut state = GameState::standard();
    state.clear_board();
    state.set_turn(Color::Black);
    state.place(pos(3, 2), Cell::BlackMan);
    state.place(pos(4, 3), Cell::RedMan);
    let cancel = AtomicBool::new(false);
    let (mv, score) = best_move(&state, 4, &cancel, None).expect("capture available");
    assert_eq!(mv.from, pos(3, 2));
    assert_eq!(mv.to, pos(5, 4));
    assert!(score > 0);
}

#[test]
fn deeper_search_is_never_illegal() {
    let state = GameState::standard();
    let cancel = AtomicBool::new(false);
    for depth in [1, 3, 6] {
        let (mv, _) = best_move(&state, depth, &cancel, None).expect("moves exist");
        assert!(rules::is_valid_move(&state, mv.from, mv.to));
    }
}
