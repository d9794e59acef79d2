//! Depth-limited minimax with alpha-beta pruning.
//!
//! The tree is built from cloned game states: each successor applies one
//! legal move to a private copy and advances the turn unless the move
//! chains. Black maximizes, red minimizes (color-coded, not
//! player-generic), so a chained capture simply keeps the same side's
//! min/max role at the next level. Cancellation is cooperative, checked
//! before expanding each node; a cancelled search returns a bound the
//! caller is expected to discard.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::board::{Color, Move};
use crate::eval::{self, LOSS_SCORE, WIN_SCORE};
use crate::game::GameState;
use crate::movegen;
use crate::rules;

/// One explored branch: the cloned state after a move, and the move that
/// produced it. Only the root level keeps these around, to recover the
/// move behind the best value.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub mv: Move,
    pub state: GameState,
}

/// Expand every legal successor of the mover. The turn advances unless the
/// applied move reports a chain continuation, matching live play exactly.
fn successors(state: &GameState, rng: Option<&mut StdRng>) -> Vec<SearchNode> {
    let mover = state.turn();
    let mut nodes: Vec<SearchNode> = movegen::legal_moves(state, mover)
        .into_iter()
        .map(|mv| {
            let mut child = state.clone();
            let applied = rules::apply_move(&mut child, mv.from, mv.to);
            if !applied.continues {
                // Search clones carry no clock; lap time is zero.
                rules::change_turn(&mut child, 0);
            }
            SearchNode { mv, state: child }
        })
        .collect();
    if let Some(rng) = rng {
        nodes.shuffle(rng);
    }
    nodes
}

/// Pick the best root move for the side to move, or `None` when the root
/// has no successor (no legal move: callers treat this as game end and
/// never apply a null move).
pub fn best_move(
    state: &GameState,
    depth: u8,
    cancel: &AtomicBool,
    mut rng: Option<&mut StdRng>,
) -> Option<(Move, i32)> {
    let roots = successors(state, rng.as_deref_mut());
    if roots.is_empty() {
        return None;
    }
    let maximizing = state.turn() == Color::Black;
    let mut alpha = LOSS_SCORE;
    let mut beta = WIN_SCORE;
    let mut best: Option<(Move, i32)> = None;
    for node in roots {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        let value = alpha_beta(&node.state, depth.saturating_sub(1), alpha, beta, cancel, rng.as_deref_mut());
        let improved = match best {
            None => true,
            Some((_, best_value)) => {
                if maximizing {
                    value > best_value
                } else {
                    value < best_value
                }
            }
        };
        if improved {
            best = Some((node.mv, value));
        }
        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Alpha-beta valuation of a state. At depth zero or on a finished game
/// this is the static evaluation; otherwise the max (black) or min (red)
/// over the successor values, pruned when `beta <= alpha`.
pub fn alpha_beta(
    state: &GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    cancel: &AtomicBool,
    mut rng: Option<&mut StdRng>,
) -> i32 {
    if cancel.load(Ordering::Relaxed) {
        return eval::evaluate(state);
    }
    if depth == 0 || rules::game_ended(state) {
        return eval::evaluate(state);
    }
    let maximizing = state.turn() == Color::Black;
    for node in successors(state, rng.as_deref_mut()) {
        let value = alpha_beta(&node.state, depth - 1, alpha, beta, cancel, rng.as_deref_mut());
        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
        if beta <= alpha {
            break;
        }
    }
    if maximizing {
        alpha
    } else {
        beta
    }
}
