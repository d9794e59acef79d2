//! Legal move enumeration.
//!
//! For every piece of a color, probe the four single-step and four two-step
//! diagonal destinations and keep the ones the rules accept. Validation is
//! delegated entirely to `rules::is_valid_move`, so mandatory captures and
//! chain restrictions fall out for free.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Color, Move, Position};
use crate::game::GameState;
use crate::rules;

/// Candidate offsets: four steps, four jumps.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-2, -2),
    (-2, 2),
    (2, -2),
    (2, 2),
];

/// Every legal move for `color` in this state. Empty exactly when the game
/// has ended for that side (or when it is not that side's turn).
pub fn legal_moves(state: &GameState, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for pos in rules::pieces_of(state, color) {
        for (dr, dc) in OFFSETS {
            let dest = pos.offset(dr, dc);
            if rules::is_valid_move(state, pos, dest) {
                moves.push(Move::new(pos, dest));
            }
        }
    }
    moves
}

/// Uniform random pick from the legal moves: the no-brain fallback
/// opponent. `None` when the side has no legal move.
pub fn random_move<R: Rng>(state: &GameState, color: Color, rng: &mut R) -> Option<Move> {
    legal_moves(state, color).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn opening_red_has_seven_moves() {
        let state = GameState::standard();
        let moves = legal_moves(&state, Color::Red);
        // Four front-row men, each with up to two steps, minus edge cuts.
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_jump()));
    }

    #[test]
    fn non_mover_color_has_no_moves() {
        let state = GameState::standard();
        // Black pieces exist but it is red's turn.
        assert!(legal_moves(&state, Color::Black).is_empty());
    }

    #[test]
    fn mandatory_capture_filters_to_jumps() {
        let mut state = GameState::standard();
        state.clear_board();
        state.place(Position::new(4, 1), Cell::RedMan);
        state.place(Position::new(3, 2), Cell::BlackMan);
        state.place(Position::new(6, 5), Cell::RedMan);
        let moves = legal_moves(&state, Color::Red);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_jump());
        assert_eq!(moves[0].to, Position::new(2, 3));
    }

    #[test]
    fn random_move_is_legal() {
        let state = GameState::standard();
        let mut rng = StdRng::seed_from_u64(7);
        let mv = random_move(&state, Color::Red, &mut rng).expect("opening has moves");
        assert!(rules::is_valid_move(&state, mv.from, mv.to));
    }

    #[test]
    fn random_move_none_without_moves() {
        let mut state = GameState::standard();
        state.clear_board();
        state.place(Position::new(0, 1), Cell::BlackKing);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(random_move(&state, Color::Red, &mut rng).is_none());
    }
}
