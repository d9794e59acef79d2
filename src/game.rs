//! Game state: players, counters, whose turn it is.
//!
//! `GameState` is the single authoritative record of a game in progress.
//! Cloning it yields a fully independent deep copy (board, players,
//! counters), which is what lets the search engine explore branches on its
//! own thread without locking.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Color, Position};

/// Where a player's moves come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatKind {
    Local,
    Remote,
    Artificial,
}

/// One seat of the game: identity plus running counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    color: Color,
    kind: SeatKind,
    name: String,
    /// Live pieces still on the board.
    pieces: u8,
    /// Opponent pieces this player has captured.
    captured: u8,
    kings: u8,
    moves: u32,
    /// Accumulated think time in seconds.
    played_secs: u64,
}

impl Player {
    pub fn new(color: Color, kind: SeatKind, name: impl Into<String>) -> Self {
        Self {
            color,
            kind,
            name: name.into(),
            pieces: 12,
            captured: 0,
            kings: 0,
            moves: 0,
            played_secs: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> SeatKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pieces(&self) -> u8 {
        self.pieces
    }

    pub fn captured(&self) -> u8 {
        self.captured
    }

    pub fn kings(&self) -> u8 {
        self.kings
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn played_secs(&self) -> u64 {
        self.played_secs
    }

    pub fn is_artificial(&self) -> bool {
        self.kind == SeatKind::Artificial
    }

    pub fn is_remote(&self) -> bool {
        self.kind == SeatKind::Remote
    }

    pub fn is_local(&self) -> bool {
        self.kind == SeatKind::Local
    }

    pub(crate) fn lose_piece(&mut self) {
        self.pieces -= 1;
    }

    pub(crate) fn record_capture(&mut self) {
        self.captured += 1;
    }

    pub(crate) fn record_king(&mut self) {
        self.kings += 1;
    }

    pub(crate) fn record_move(&mut self) {
        self.moves += 1;
    }

    pub(crate) fn add_played_secs(&mut self, secs: u64) {
        self.played_secs += secs;
    }
}

/// Board, both players, turn pointer, chain-capture marker and the four
/// piece counters kept in sync with the board for O(1) evaluation.
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    players: [Player; 2],
    /// Index into `players` of the side to move.
    current: usize,
    /// Mid chain capture: the piece that must move again.
    chain_piece: Option<Position>,
    red_men: u8,
    red_kings: u8,
    black_men: u8,
    black_kings: u8,
}

impl GameState {
    /// New game with the standard opening layout. The red player moves
    /// first.
    pub fn new(red: Player, black: Player) -> Self {
        debug_assert_eq!(red.color(), Color::Red);
        debug_assert_eq!(black.color(), Color::Black);
        Self {
            board: Board::new(),
            players: [red, black],
            current: 0,
            chain_piece: None,
            red_men: 12,
            red_kings: 0,
            black_men: 12,
            black_kings: 0,
        }
    }

    /// Default local red-vs-black game.
    pub fn standard() -> Self {
        Self::new(
            Player::new(Color::Red, SeatKind::Local, "Player A"),
            Player::new(Color::Black, SeatKind::Local, "Player B"),
        )
    }

    /// Reset to the opening layout, keeping seat identities.
    pub fn reset(&mut self) {
        let red = Player::new(
            Color::Red,
            self.players[0].kind(),
            self.players[0].name().to_owned(),
        );
        let black = Player::new(
            Color::Black,
            self.players[1].kind(),
            self.players[1].name().to_owned(),
        );
        *self = Self::new(red, black);
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn rival_player(&self) -> &Player {
        &self.players[1 - self.current]
    }

    pub(crate) fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    pub(crate) fn rival_player_mut(&mut self) -> &mut Player {
        &mut self.players[1 - self.current]
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Red => &self.players[0],
            Color::Black => &self.players[1],
        }
    }

    /// Color of the side to move.
    pub fn turn(&self) -> Color {
        self.current_player().color()
    }

    /// Swap mover and waiter. Does not touch the chain marker; the rules
    /// module clears it before calling this.
    pub(crate) fn swap_players(&mut self) {
        self.current = 1 - self.current;
    }

    pub fn chain_piece(&self) -> Option<Position> {
        self.chain_piece
    }

    pub(crate) fn set_chain_piece(&mut self, pos: Option<Position>) {
        self.chain_piece = pos;
    }

    pub fn red_men(&self) -> u8 {
        self.red_men
    }

    pub fn red_kings(&self) -> u8 {
        self.red_kings
    }

    pub fn black_men(&self) -> u8 {
        self.black_men
    }

    pub fn black_kings(&self) -> u8 {
        self.black_kings
    }

    /// Adjust the man/king counter matching a removed or transformed cell.
    pub(crate) fn bump_counter(&mut self, cell: Cell, delta: i8) {
        let counter = match cell {
            Cell::RedMan => &mut self.red_men,
            Cell::RedKing => &mut self.red_kings,
            Cell::BlackMan => &mut self.black_men,
            Cell::BlackKing => &mut self.black_kings,
            _ => return,
        };
        *counter = counter.wrapping_add_signed(delta);
    }

    /// Empty the board and zero every piece counter. Starting point for
    /// setting up an arbitrary position with `place`.
    pub fn clear_board(&mut self) {
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                if (row + col) % 2 == 1 {
                    self.board.set(pos, Cell::EmptyDark);
                }
            }
        }
        self.red_men = 0;
        self.red_kings = 0;
        self.black_men = 0;
        self.black_kings = 0;
        self.players[0].pieces = 0;
        self.players[1].pieces = 0;
    }

    /// Put a piece on a dark cell, keeping the counters and the owner's
    /// live piece count in sync. Replaces whatever was there.
    pub fn place(&mut self, pos: Position, cell: Cell) {
        debug_assert!(pos.in_range() && (pos.row + pos.col) % 2 == 1);
        let old = self.board.get(pos);
        if let Some(color) = old.color() {
            self.bump_counter(old, -1);
            match color {
                Color::Red => self.players[0].pieces -= 1,
                Color::Black => self.players[1].pieces -= 1,
            }
        }
        self.board.set(pos, cell);
        if let Some(color) = cell.color() {
            self.bump_counter(cell, 1);
            match color {
                Color::Red => self.players[0].pieces += 1,
                Color::Black => self.players[1].pieces += 1,
            }
        }
    }

    /// Force the side to move. Setup helper, analogous to choosing the
    /// side-to-move field of a position string.
    pub fn set_turn(&mut self, color: Color) {
        if self.turn() != color {
            self.swap_players();
        }
    }

    /// Recount the board and verify the counters. Test/debug aid for the
    /// counter invariant.
    pub fn counters_consistent(&self) -> bool {
        let mut counts = [0u8; 4];
        for row in 0..8 {
            for col in 0..8 {
                match self.board.get(Position::new(row, col)) {
                    Cell::RedMan => counts[0] += 1,
                    Cell::RedKing => counts[1] += 1,
                    Cell::BlackMan => counts[2] += 1,
                    Cell::BlackKing => counts[3] += 1,
                    _ => {}
                }
            }
        }
        counts == [self.red_men, self.red_kings, self.black_men, self.black_kings]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_counters() {
        let state = GameState::standard();
        assert_eq!(state.red_men(), 12);
        assert_eq!(state.black_men(), 12);
        assert_eq!(state.red_kings(), 0);
        assert_eq!(state.black_kings(), 0);
        assert!(state.counters_consistent());
        assert_eq!(state.turn(), Color::Red);
        assert!(state.chain_piece().is_none());
    }

    #[test]
    fn clone_is_independent() {
        let mut state = GameState::standard();
        let snapshot = state.clone();
        state.board.swap(Position::new(5, 0), Position::new(4, 1));
        state.swap_players();
        assert_eq!(snapshot.board.get(Position::new(5, 0)), Cell::RedMan);
        assert_eq!(snapshot.turn(), Color::Red);
        assert_eq!(state.turn(), Color::Black);
    }

    #[test]
    fn swap_players_alternates() {
        let mut state = GameState::standard();
        assert_eq!(state.turn(), Color::Red);
        state.swap_players();
        assert_eq!(state.turn(), Color::Black);
        state.swap_players();
        assert_eq!(state.turn(), Color::Red);
    }

    #[test]
    fn bump_counter_matches_cells() {
        let mut state = GameState::standard();
        state.bump_counter(Cell::RedMan, -1);
        state.bump_counter(Cell::RedKing, 1);
        assert_eq!(state.red_men(), 11);
        assert_eq!(state.red_kings(), 1);
        // Floor cells are ignored.
        state.bump_counter(Cell::EmptyDark, 1);
        assert_eq!(state.red_men(), 11);
    }

    #[test]
    fn reset_keeps_seats() {
        let mut state = GameState::new(
            Player::new(Color::Red, SeatKind::Local, "ada"),
            Player::new(Color::Black, SeatKind::Artificial, "bot"),
        );
        state.swap_players();
        state.current_player_mut().record_move();
        state.reset();
        assert_eq!(state.turn(), Color::Red);
        assert_eq!(state.player(Color::Black).kind(), SeatKind::Artificial);
        assert_eq!(state.player(Color::Black).name(), "bot");
        assert_eq!(state.player(Color::Black).moves(), 0);
    }
}
