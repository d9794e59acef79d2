//! Adversarial search: alpha-beta minimax over cloned game states, driven
//! by a cancellable background engine.

pub mod engine;
pub mod minimax;
pub mod params;

pub use engine::{SearchEngine, SearchOutcome, SearchStatus};
pub use minimax::{alpha_beta, best_move};
pub use params::{Difficulty, SearchParams};
