//! Error taxonomy.
//!
//! Invalid moves are deliberately not errors: they are frequent, advisory
//! outcomes reported through events. Errors here are the conditions that
//! end or corrupt a game.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The search reported no root move while the game had not ended: a
    /// logic defect that must never be retried silently.
    #[error("search found no move in a non-terminal position")]
    NoMoveFound,

    /// The peer vanished mid-game. Fatal to the current game only.
    #[error("connection to remote peer lost")]
    ConnectionLost,

    /// A coordinator channel closed while the game was live.
    #[error("coordinator channel closed")]
    ChannelClosed,
}
