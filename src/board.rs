//! Board primitives: cells, positions, moves.
//!
//! The board is pure data. It knows which cells are playable and how the
//! opening layout looks, but nothing about move legality; that lives in
//! the rules module.

use std::fmt;

/// Piece color. Red moves toward row 0, black toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The opposing color.
    pub fn rival(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Forward row direction for men of this color.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// Promotion row for this color.
    pub fn back_rank(self) -> i8 {
        match self {
            Color::Red => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// One cell of the board.
///
/// Light cells are never occupied; pieces live on dark cells only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    EmptyLight,
    EmptyDark,
    RedMan,
    RedKing,
    BlackMan,
    BlackKing,
}

impl Cell {
    /// Color of the piece on this cell, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::RedMan | Cell::RedKing => Some(Color::Red),
            Cell::BlackMan | Cell::BlackKing => Some(Color::Black),
            _ => None,
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, Cell::RedKing | Cell::BlackKing)
    }

    pub fn is_man(self) -> bool {
        matches!(self, Cell::RedMan | Cell::BlackMan)
    }

    /// Playable and unoccupied.
    pub fn is_empty_dark(self) -> bool {
        self == Cell::EmptyDark
    }

    /// Man variant for a color.
    pub fn man(color: Color) -> Cell {
        match color {
            Color::Red => Cell::RedMan,
            Color::Black => Cell::BlackMan,
        }
    }

    /// King variant for a color.
    pub fn king(color: Color) -> Cell {
        match color {
            Color::Red => Cell::RedKing,
            Color::Black => Cell::BlackKing,
        }
    }
}

/// A row/column pair. Signed so off-board probes stay representable;
/// `in_range` gates every board access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Inside the 8x8 board.
    pub fn in_range(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// Position displaced by (dr, dc). May be out of range.
    pub fn offset(self, dr: i8, dc: i8) -> Position {
        Position::new(self.row + dr, self.col + dc)
    }

    /// Cell halfway between `self` and `other`. Only meaningful for
    /// two-step diagonal moves, where it names the jumped piece.
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// An ordered origin/destination pair. Used both as a proposal and as an
/// applied-move record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// A two-step diagonal, i.e. a capture candidate.
    pub fn is_jump(self) -> bool {
        (self.from.row - self.to.row).abs() == 2
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// 8x8 grid of cells. Deep-copied on clone (`Cell` is `Copy`), so cloned
/// game states never alias board storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard opening layout: 12 black men on the dark cells of rows 0-2,
    /// 12 red men on the dark cells of rows 5-7.
    pub fn new() -> Self {
        let mut board = Self {
            cells: [[Cell::EmptyLight; 8]; 8],
        };
        board.reset();
        board
    }

    /// Restore the opening layout.
    pub fn reset(&mut self) {
        for row in 0..8i8 {
            for col in 0..8i8 {
                let cell = if (row + col) % 2 == 1 {
                    match row {
                        0..=2 => Cell::man(Color::Black),
                        5..=7 => Cell::man(Color::Red),
                        _ => Cell::EmptyDark,
                    }
                } else {
                    Cell::EmptyLight
                };
                self.cells[row as usize][col as usize] = cell;
            }
        }
    }

    /// Cell value at a position. `pos` must be in range.
    pub fn get(&self, pos: Position) -> Cell {
        debug_assert!(pos.in_range(), "board access out of range: {pos}");
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// Overwrite the cell at a position. `pos` must be in range.
    pub fn set(&mut self, pos: Position, value: Cell) {
        debug_assert!(pos.in_range(), "board access out of range: {pos}");
        self.cells[pos.row as usize][pos.col as usize] = value;
    }

    /// Exchange the contents of two cells (moves a piece onto an empty
    /// dark cell and leaves an empty dark cell behind).
    pub fn swap(&mut self, a: Position, b: Position) {
        let tmp = self.get(a);
        self.set(a, self.get(b));
        self.set(b, tmp);
    }
}

impl fmt::Display for Board {
    /// Row/column-labelled grid. Lowercase for men, uppercase for kings,
    /// dots for playable empty cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..8 {
            write!(f, "{row}")?;
            for col in 0..8 {
                let glyph = match self.get(Position::new(row, col)) {
                    Cell::EmptyLight => ' ',
                    Cell::EmptyDark => '.',
                    Cell::RedMan => 'r',
                    Cell::RedKing => 'R',
                    Cell::BlackMan => 'b',
                    Cell::BlackKing => 'B',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
