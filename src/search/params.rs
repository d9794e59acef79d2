//! Search configuration.
//!
//! Difficulty picks both a depth horizon and a minimum think time: deeper
//! searches may still answer fast on sparse boards, and the floor keeps the
//! artificial player from appearing to move instantly.

/// Artificial opponent difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    /// Search depth in plies.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Moderate => 6,
            Difficulty::Hard => 8,
        }
    }

    /// Minimum wall-clock milliseconds before the result is delivered.
    pub fn min_think_ms(self) -> u64 {
        match self {
            Difficulty::Easy => 1200,
            Difficulty::Moderate => 1000,
            Difficulty::Hard => 800,
        }
    }
}

/// Parameters for one search run.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Depth horizon in plies.
    pub depth: u8,
    /// Minimum think time in milliseconds (0 = deliver immediately).
    pub min_think_ms: u64,
    /// Fixed RNG seed for reproducible successor shuffling; `None` draws
    /// from entropy.
    pub seed: Option<u64>,
    /// Shuffle successors before searching. Disabled only by tests that
    /// need deterministic ordering.
    pub shuffle: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 4,
            min_think_ms: 0,
            seed: None,
            shuffle: true,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth horizon.
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set the minimum think time.
    pub fn min_think_ms(mut self, ms: u64) -> Self {
        self.min_think_ms = ms;
        self
    }

    /// Fix the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable successor shuffling.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

impl From<Difficulty> for SearchParams {
    fn from(level: Difficulty) -> Self {
        SearchParams::new()
            .depth(level.depth())
            .min_think_ms(level.min_think_ms())
    }
}
