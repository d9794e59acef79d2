//! Network message shapes.
//!
//! Transport-agnostic: the crate defines what peers say to each other, not
//! how bytes travel. A closed tagged enum replaces stringly-typed command
//! dispatch; serde gives any transport a serialization to hang it on. An
//! inbound `Move` is handled exactly like a local proposal from a remote
//! seat.

use serde::{Deserialize, Serialize};

use crate::board::{Color, Move, Position};

/// One message between peers or from the connection lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetMessage {
    /// Handshake: who is on the other end and which color they hold.
    Hello { name: String, color: NetColor },
    /// Both seats are filled; begin play.
    Start,
    /// A move proposal from the peer.
    Move {
        from_row: i8,
        from_col: i8,
        to_row: i8,
        to_col: i8,
    },
    /// Free-form chat line.
    Chat {
        text: String,
        sender: String,
        color: NetColor,
    },
    /// Connection lifecycle signals from the transport.
    PeerConnected,
    PeerDisconnected,
    Rejected,
}

/// Wire-stable color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetColor {
    Red,
    Black,
}

impl From<Color> for NetColor {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => NetColor::Red,
            Color::Black => NetColor::Black,
        }
    }
}

impl From<NetColor> for Color {
    fn from(color: NetColor) -> Self {
        match color {
            NetColor::Red => Color::Red,
            NetColor::Black => Color::Black,
        }
    }
}

impl NetMessage {
    /// Wrap an applied or proposed move for the peer.
    pub fn from_move(mv: Move) -> Self {
        NetMessage::Move {
            from_row: mv.from.row,
            from_col: mv.from.col,
            to_row: mv.to.row,
            to_col: mv.to.col,
        }
    }

    /// Extract the move from a `Move` message. Coordinates are taken as-is;
    /// range checking is the rules engine's job.
    pub fn as_move(&self) -> Option<Move> {
        match *self {
            NetMessage::Move {
                from_row,
                from_col,
                to_row,
                to_col,
            } => Some(Move::new(
                Position::new(from_row, from_col),
                Position::new(to_row, to_col),
            )),
            _ => None,
        }
    }
}
