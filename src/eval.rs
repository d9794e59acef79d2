//! Static evaluation.
//!
//! Signed score: positive favors black, negative favors red. Material is
//! read from the O(1) state counters; a per-piece positional term rewards
//! advancing toward the rival's back rank, which nudges men into promotion
//! races. Exact weights are tuning, not contract, but the monotonicity
//! holds: more material or more advanced pieces never scores worse for the
//! owning side.

use crate::board::{Cell, Color, Position};
use crate::game::GameState;

/// Material weight of a man.
const MAN_WEIGHT: i32 = 60;
/// Material weight of a king. Kings dominate men by a wide margin.
const KING_WEIGHT: i32 = 200;

/// Score below which red cannot go / above which black cannot go; used as
/// the initial alpha-beta window.
pub const WIN_SCORE: i32 = 1000;
pub const LOSS_SCORE: i32 = -1000;

/// Evaluate a state. Black maximizes, red minimizes.
pub fn evaluate(state: &GameState) -> i32 {
    let mut value = 0i32;
    for row in 0..8i8 {
        for col in 0..8i8 {
            match state.board.get(Position::new(row, col)) {
                // Red advances toward row 0: the bonus magnitude grows as
                // the row number shrinks.
                Cell::RedMan | Cell::RedKing => value -= 80 - 10 * i32::from(row),
                Cell::BlackMan | Cell::BlackKing => value += (i32::from(row) + 1) * 10,
                _ => {}
            }
        }
    }
    value -= i32::from(state.red_men()) * MAN_WEIGHT;
    value -= i32::from(state.red_kings()) * KING_WEIGHT;
    value += i32::from(state.black_men()) * MAN_WEIGHT;
    value += i32::from(state.black_kings()) * KING_WEIGHT;
    value
}
