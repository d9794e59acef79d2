//! Move validation, application and terminal conditions.
//!
//! All functions here are pure computation over a borrowed `GameState`;
//! nothing blocks, so they are safe to call from whichever thread owns the
//! state (the coordinator for the live game, a search thread for clones).
//!
//! Rule set: men move one diagonal step forward, kings one step either way;
//! captures jump two steps over an adjacent rival into an empty dark cell.
//! Captures are mandatory board-wide: if the mover can capture anywhere,
//! every non-capturing move is rejected, even for pieces that individually
//! cannot capture. A capture that can be extended by the same piece forces
//! that piece to keep jumping; promotion ends the chain.

use crate::board::{Cell, Color, Position};
use crate::game::{GameState, Player};

/// Record of one applied move, consumed by the coordinator to emit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// Position of the removed rival piece, if the move captured.
    pub captured: Option<Position>,
    /// The moved man reached the back rank and became a king.
    pub promoted: bool,
    /// The same player must move again (chain capture in progress).
    pub continues: bool,
}

/// Validate a candidate move for the side to move.
///
/// Checks, in order: both positions in range, forced-continuation origin,
/// origin owned by the mover, destination empty and dark, board-wide
/// mandatory capture, then geometry and direction (kings exempt from the
/// forward-only constraint).
pub fn is_valid_move(state: &GameState, orig: Position, dest: Position) -> bool {
    let mover = state.turn();
    if !orig.in_range() || !dest.in_range() {
        return false;
    }
    // Mid chain capture: only the chained piece may move.
    if let Some(chain) = state.chain_piece() {
        if chain != orig {
            return false;
        }
    }
    let piece = state.board.get(orig);
    if piece.color() != Some(mover) {
        return false;
    }
    if !state.board.get(dest).is_empty_dark() {
        return false;
    }
    // Global obligation: any available capture invalidates plain moves.
    if mandatory_capture(state, mover) && !move_captures(state, orig, dest) {
        return false;
    }
    let row_len = (orig.row - dest.row).abs();
    let col_len = (orig.col - dest.col).abs();
    if row_len != col_len || !(row_len == 1 || row_len == 2) {
        return false;
    }
    // Positive when moving toward row 0 (red's forward direction).
    let move_dir = orig.row - dest.row;
    let forward_ok = piece.is_king()
        || match mover {
            Color::Red => move_dir > 0,
            Color::Black => move_dir < 0,
        };
    if row_len == 1 {
        return forward_ok;
    }
    // Two-step move must jump a rival piece.
    let mid = state.board.get(orig.midpoint(dest));
    mid.color() == Some(mover.rival()) && forward_ok
}

/// Apply a validated move: swap cells, remove a captured piece, promote on
/// the back rank, bump every affected counter. Sets or clears the
/// forced-continuation marker and reports whether the turn continues.
///
/// The move must have passed `is_valid_move`; feeding an invalid move here
/// corrupts the counters.
pub fn apply_move(state: &mut GameState, orig: Position, dest: Position) -> AppliedMove {
    let eats = move_captures(state, orig, dest);
    let promotes = move_promotes(state, orig, dest);
    state.board.swap(orig, dest);
    state.current_player_mut().record_move();

    let mut captured = None;
    if eats {
        let mid = orig.midpoint(dest);
        let victim = state.board.get(mid);
        state.bump_counter(victim, -1);
        state.rival_player_mut().lose_piece();
        state.current_player_mut().record_capture();
        state.board.set(mid, Cell::EmptyDark);
        captured = Some(mid);
    }
    if promotes {
        let mover = state.turn();
        let man = state.board.get(dest);
        state.bump_counter(man, -1);
        state.board.set(dest, Cell::king(mover));
        state.bump_counter(Cell::king(mover), 1);
        state.current_player_mut().record_king();
    }

    // A chain continues only on a non-promoting capture with another
    // capture available from the landing square.
    let continues = !promotes && eats && can_capture(state, dest);
    state.set_chain_piece(if continues { Some(dest) } else { None });
    AppliedMove {
        captured,
        promoted: promotes,
        continues,
    }
}

/// Hand the turn to the rival: clear the chain marker, fold the elapsed
/// lap seconds into the player who just moved, swap the turn pointer.
pub fn change_turn(state: &mut GameState, lap_secs: u64) {
    state.set_chain_piece(None);
    state.current_player_mut().add_played_secs(lap_secs);
    state.swap_players();
}

/// The side to move has no legal move anywhere: game over.
pub fn game_ended(state: &GameState) -> bool {
    !has_movement(state, state.turn())
}

/// The player whose opponent cannot move. `None` while the game is live,
/// and also in the (unreachable under correct rules) case where neither
/// side can move.
pub fn winner(state: &GameState) -> Option<&Player> {
    let red_moves = has_movement(state, Color::Red);
    let black_moves = has_movement(state, Color::Black);
    match (red_moves, black_moves) {
        (false, true) => Some(state.player(Color::Black)),
        (true, false) => Some(state.player(Color::Red)),
        _ => None,
    }
}

/// Positions of every piece of a color. 64-cell scan.
pub fn pieces_of(state: &GameState, color: Color) -> Vec<Position> {
    let mut result = Vec::new();
    for row in 0..8 {
        for col in 0..8 {
            let pos = Position::new(row, col);
            if state.board.get(pos).color() == Some(color) {
                result.push(pos);
            }
        }
    }
    result
}

/// Whether the color has a capture available anywhere on the board. This
/// scan is deliberately board-wide, not piece-local: one piece's capture
/// obligates the whole side.
pub fn mandatory_capture(state: &GameState, color: Color) -> bool {
    pieces_of(state, color)
        .into_iter()
        .any(|pos| can_capture(state, pos))
}

/// Whether the piece at `pos` can jump a rival right now. Men probe their
/// two forward diagonals, kings all four.
pub fn can_capture(state: &GameState, pos: Position) -> bool {
    let piece = state.board.get(pos);
    let Some(color) = piece.color() else {
        return false;
    };
    let rival = color.rival();
    let both = [color.forward(), -color.forward()];
    let dirs = if piece.is_king() { &both[..] } else { &both[..1] };
    for &dr in dirs {
        for dc in [-1i8, 1] {
            let over = pos.offset(dr, dc);
            let land = pos.offset(dr * 2, dc * 2);
            if over.in_range()
                && land.in_range()
                && state.board.get(over).color() == Some(rival)
                && state.board.get(land).is_empty_dark()
            {
                return true;
            }
        }
    }
    false
}

/// Whether the piece at `pos` has an ordinary one-step move.
fn can_step(state: &GameState, pos: Position) -> bool {
    let piece = state.board.get(pos);
    let Some(color) = piece.color() else {
        return false;
    };
    let both = [color.forward(), -color.forward()];
    let dirs = if piece.is_king() { &both[..] } else { &both[..1] };
    for &dr in dirs {
        for dc in [-1i8, 1] {
            let dest = pos.offset(dr, dc);
            if dest.in_range() && state.board.get(dest).is_empty_dark() {
                return true;
            }
        }
    }
    false
}

/// Any piece of the color can step or capture.
fn has_movement(state: &GameState, color: Color) -> bool {
    pieces_of(state, color)
        .into_iter()
        .any(|pos| can_step(state, pos) || can_capture(state, pos))
}

/// The move jumps two columns over a rival piece onto an empty dark cell.
fn move_captures(state: &GameState, orig: Position, dest: Position) -> bool {
    if (orig.col - dest.col).abs() != 2 {
        return false;
    }
    let piece = state.board.get(orig);
    let mid = state.board.get(orig.midpoint(dest));
    match piece.color() {
        Some(color) => {
            mid.color() == Some(color.rival()) && state.board.get(dest).is_empty_dark()
        }
        None => false,
    }
}

/// The moved piece is a man landing on its promotion row.
fn move_promotes(state: &GameState, orig: Position, dest: Position) -> bool {
    let piece = state.board.get(orig);
    match piece.color() {
        Some(color) => piece.is_man() && dest.row == color.back_rank(),
        None => false,
    }
}
