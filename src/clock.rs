//! Elapsed play time tracking.
//!
//! Replaces a process-wide singleton stopwatch with an injectable service:
//! the coordinator owns one instance per game and folds per-turn laps into
//! the players. Monotonic-clock based, safe to read from any thread.

use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug, Default)]
struct ClockInner {
    /// Seconds accumulated across completed run intervals.
    banked: u64,
    /// When the clock was last started, if running.
    running_since: Option<Instant>,
    /// Total seconds at the previous lap call.
    lap_mark: u64,
}

/// Resettable elapsed-seconds counter with lap support.
#[derive(Debug, Default)]
pub struct GameClock {
    inner: Mutex<ClockInner>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) counting. Idempotent while running.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        if inner.running_since.is_none() {
            inner.running_since = Some(Instant::now());
        }
    }

    /// Stop counting, banking the elapsed interval.
    pub fn pause(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(since) = inner.running_since.take() {
            inner.banked += since.elapsed().as_secs();
        }
    }

    /// Back to zero, stopped.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        *inner = ClockInner::default();
    }

    /// Total elapsed seconds since start, across pauses.
    pub fn seconds(&self) -> u64 {
        let inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        Self::total(&inner)
    }

    /// Seconds elapsed since the previous `lap` call (or since start for
    /// the first). Used to charge think time to the player who just moved.
    pub fn lap(&self) -> u64 {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        let now = Self::total(&inner);
        let lap = now - inner.lap_mark;
        inner.lap_mark = now;
        lap
    }

    fn total(inner: &ClockInner) -> u64 {
        inner.banked
            + inner
                .running_since
                .map(|since| since.elapsed().as_secs())
                .unwrap_or(0)
    }
}

/// Render seconds as "HH:MM:SS".
pub fn format_time(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
