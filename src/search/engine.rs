//! Background search driver.
//!
//! One search thread at a time, fed a private clone of the live state so
//! the coordinator's copy is never shared or locked. Cancellation is a
//! cooperative flag observed at node boundaries; `abort` sets it and joins
//! the worker, which is the teardown ordering the coordinator relies on
//! before resetting shared state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::board::Move;
use crate::game::GameState;
use crate::search::minimax;
use crate::search::params::SearchParams;

/// What a finished search run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The move of the best-valued root branch.
    Best { mv: Move, score: i32 },
    /// The root had no successor: equivalent to game end, never a null
    /// move.
    NoMove,
    /// The run was cancelled; any partial result has been discarded.
    Cancelled,
}

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Searching,
    Cancelled,
}

/// Owns the search worker thread and its cancellation flag. Results are
/// pushed into the channel handed over at construction; starting a search
/// never blocks the caller.
pub struct SearchEngine {
    result_tx: Sender<SearchOutcome>,
    cancel: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
    status: SearchStatus,
}

impl SearchEngine {
    pub fn new(result_tx: Sender<SearchOutcome>) -> Self {
        Self {
            result_tx,
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
            status: SearchStatus::Idle,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_searching(&self) -> bool {
        self.status == SearchStatus::Searching
    }

    /// Spawn a search over a clone of `state`. Strictly one worker at a
    /// time: a still-running search is aborted first.
    pub fn start(&mut self, state: &GameState, params: &SearchParams) {
        if self.worker.is_some() {
            warn!("search started while another was active; aborting the old run");
            self.abort();
        }
        self.cancel.store(false, Ordering::Release);
        let snapshot = state.clone();
        let params = params.clone();
        let cancel = Arc::clone(&self.cancel);
        let tx = self.result_tx.clone();
        let handle = thread::Builder::new()
            .name("damista-search".into())
            .spawn(move || {
                let started = Instant::now();
                let mut rng = params
                    .shuffle
                    .then(|| match params.seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    });
                let result =
                    minimax::best_move(&snapshot, params.depth, &cancel, rng.as_mut());
                // Hold the answer back until the think-time floor passes,
                // unless we are being torn down.
                while started.elapsed() < Duration::from_millis(params.min_think_ms)
                    && !cancel.load(Ordering::Relaxed)
                {
                    thread::sleep(Duration::from_millis(25));
                }
                let outcome = if cancel.load(Ordering::Relaxed) {
                    SearchOutcome::Cancelled
                } else {
                    match result {
                        Some((mv, score)) => SearchOutcome::Best { mv, score },
                        None => SearchOutcome::NoMove,
                    }
                };
                debug!(?outcome, elapsed_ms = started.elapsed().as_millis() as u64, "search finished");
                // The receiver may already be gone during shutdown.
                let _ = tx.send(outcome);
            })
            .expect("failed to spawn search thread");
        self.worker = Some(handle);
        self.status = SearchStatus::Searching;
    }

    /// Request cooperative termination. The worker observes the flag at
    /// latest after its current node's move loop.
    pub fn cancel(&mut self) {
        if self.worker.is_some() {
            self.cancel.store(true, Ordering::Release);
            self.status = SearchStatus::Cancelled;
        }
    }

    /// Reap the worker thread after its outcome has been received, or
    /// after a cancel. Blocks until the thread observes the flag.
    pub fn join(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
        self.status = SearchStatus::Idle;
    }

    /// Cancel and join: the mandatory ordering before tearing down state a
    /// worker might still be reading.
    pub fn abort(&mut self) {
        self.cancel();
        self.join();
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    #[test]
    fn delivers_result_asynchronously() {
        let (tx, rx) = unbounded();
        let mut engine = SearchEngine::new(tx);
        let state = GameState::standard();
        engine.start(&state, &SearchParams::new().depth(3).seed(1));
        assert!(engine.is_searching());
        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        match outcome {
            SearchOutcome::Best { mv, .. } => {
                assert!(crate::rules::is_valid_move(&state, mv.from, mv.to));
            }
            other => panic!("expected a move, got {other:?}"),
        }
        engine.join();
        assert_eq!(engine.status(), SearchStatus::Idle);
    }

    #[test]
    fn respects_min_think_time() {
        let (tx, rx) = unbounded();
        let mut engine = SearchEngine::new(tx);
        let state = GameState::standard();
        let started = Instant::now();
        engine.start(&state, &SearchParams::new().depth(1).min_think_ms(200));
        let _ = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
        engine.join();
    }

    #[test]
    fn cancel_reports_cancelled() {
        let (tx, rx) = unbounded();
        let mut engine = SearchEngine::new(tx);
        let state = GameState::standard();
        // Deep search plus a think floor so the cancel lands in flight.
        engine.start(&state, &SearchParams::new().depth(10).min_think_ms(2000));
        engine.cancel();
        assert_eq!(engine.status(), SearchStatus::Cancelled);
        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        engine.join();
    }

    #[test]
    fn no_move_on_terminal_position() {
        let (tx, rx) = unbounded();
        let mut engine = SearchEngine::new(tx);
        let mut state = GameState::standard();
        state.clear_board();
        state.place(crate::board::Position::new(0, 1), crate::board::Cell::BlackKing);
        engine.start(&state, &SearchParams::new().depth(3));
        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome, SearchOutcome::NoMove);
        engine.join();
    }
}
