//! Damista checkers engine: board and rules, alpha-beta search with a
//! cancellable background worker, and a turn coordinator that arbitrates
//! between local input, a network peer and the artificial player.

pub mod board;
pub mod clock;
pub mod coordinator;
pub mod error;
pub mod eval;
pub mod events;
pub mod game;
pub mod movegen;
pub mod net;
pub mod rules;
pub mod search;
