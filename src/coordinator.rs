//! Turn coordination between local input, the network peer and the search
//! engine.
//!
//! The coordinator owns the only live `GameState` and processes commands
//! from a single-consumer channel, so at most one move is validated and
//! applied at a time no matter which thread proposed it. Proposing never
//! blocks the proposer; accept/reject outcomes come back as events.
//! Search results re-enter through the same loop and are treated as
//! proposals from the artificial seat, re-validated against the live state
//! before being applied.

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::board::{Color, Move};
use crate::clock::GameClock;
use crate::error::GameError;
use crate::events::{EventBus, GameEvent};
use crate::game::{GameState, Player, SeatKind};
use crate::rules;
use crate::search::{Difficulty, SearchEngine, SearchOutcome, SearchParams};

/// Where the coordinator is in its turn cycle. `Validating`, `Applying`
/// and `CheckingEnd` are transient, passed through while a proposal is
/// processed; the loop comes to rest in `Idle`, `AwaitingMove`,
/// `ContinuingSamePlayer` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game in progress.
    Idle,
    AwaitingMove,
    Validating,
    Applying,
    /// Mid chain capture: the same player must jump again.
    ContinuingSamePlayer,
    CheckingEnd,
    GameOver,
}

/// Everything the coordinator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Begin a new game with the configured seats.
    Start,
    /// A move proposal; `source` is the kind of seat that produced it.
    Propose { source: SeatKind, mv: Move },
    /// The transport reported the peer gone: abort the current game.
    PeerLost,
    /// Abort the current game and return to `Idle`.
    Stop,
    /// Exit the event loop.
    Shutdown,
}

/// One seat of the configuration.
#[derive(Debug, Clone)]
pub struct SeatConfig {
    pub name: String,
    pub kind: SeatKind,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, kind: SeatKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Full game setup consumed at construction.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub red: SeatConfig,
    pub black: SeatConfig,
    pub difficulty: Difficulty,
    /// Fixed search seed for reproducible artificial play.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            red: SeatConfig::new("Player A", SeatKind::Local),
            black: SeatConfig::new("Player B", SeatKind::Artificial),
            difficulty: Difficulty::Moderate,
            seed: None,
        }
    }
}

/// Cloneable command-side handle to a running coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    cmd_tx: Sender<Command>,
}

impl CoordinatorHandle {
    pub fn send(&self, cmd: Command) -> Result<(), GameError> {
        self.cmd_tx.send(cmd).map_err(|_| GameError::ChannelClosed)
    }

    pub fn start_game(&self) -> Result<(), GameError> {
        self.send(Command::Start)
    }

    pub fn propose(&self, source: SeatKind, mv: Move) -> Result<(), GameError> {
        self.send(Command::Propose { source, mv })
    }

    pub fn stop(&self) -> Result<(), GameError> {
        self.send(Command::Stop)
    }

    pub fn shutdown(&self) -> Result<(), GameError> {
        self.send(Command::Shutdown)
    }
}

/// The turn state machine. Owns the live game state, the clock, the event
/// fan-out and the search engine.
pub struct TurnCoordinator {
    state: GameState,
    phase: Phase,
    clock: GameClock,
    engine: SearchEngine,
    params: SearchParams,
    bus: EventBus,
    cmd_rx: Receiver<Command>,
    search_rx: Receiver<SearchOutcome>,
}

impl TurnCoordinator {
    pub fn new(config: GameConfig) -> (Self, CoordinatorHandle) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (search_tx, search_rx) = unbounded();
        let mut params = SearchParams::from(config.difficulty);
        if let Some(seed) = config.seed {
            params = params.seed(seed);
        }
        let state = GameState::new(
            Player::new(Color::Red, config.red.kind, config.red.name),
            Player::new(Color::Black, config.black.kind, config.black.name),
        );
        let coordinator = Self {
            state,
            phase: Phase::Idle,
            clock: GameClock::new(),
            engine: SearchEngine::new(search_tx),
            params,
            bus: EventBus::new(),
            cmd_rx,
            search_rx,
        };
        (coordinator, CoordinatorHandle { cmd_tx })
    }

    /// Register an event subscriber. Call before `run`.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.bus.subscribe()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the live state. Only safe from the coordinator's
    /// own processing context (tests drive commands synchronously).
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Event loop: consume commands and search outcomes until shutdown.
    pub fn run(mut self) {
        info!("turn coordinator running");
        loop {
            select! {
                recv(self.cmd_rx) -> cmd => match cmd {
                    Ok(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                recv(self.search_rx) -> outcome => match outcome {
                    Ok(outcome) => {
                        if let Err(err) = self.handle_search_outcome(outcome) {
                            error!(%err, "search outcome handling failed");
                        }
                    }
                    Err(_) => break,
                },
            }
        }
        self.engine.abort();
        info!("turn coordinator stopped");
    }

    /// Process one command. Returns `false` on shutdown.
    pub fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Start => self.start_game(),
            Command::Propose { source, mv } => self.handle_proposal(source, mv),
            Command::PeerLost => {
                let err = GameError::ConnectionLost;
                warn!(%err, "aborting game");
                self.abort_game();
            }
            Command::Stop => self.abort_game(),
            Command::Shutdown => return false,
        }
        true
    }

    fn start_game(&mut self) {
        // A restart while a search is in flight must join the worker
        // before the state it was reading is reset.
        self.engine.abort();
        self.discard_stale_outcomes();
        self.state.reset();
        self.clock.reset();
        self.clock.start();
        self.phase = Phase::AwaitingMove;
        let first = self.state.turn();
        info!(%first, "game started");
        self.bus.publish(GameEvent::GameStart { first });
        self.maybe_start_search();
    }

    fn abort_game(&mut self) {
        self.engine.abort();
        self.discard_stale_outcomes();
        self.state.reset();
        self.clock.reset();
        self.phase = Phase::Idle;
    }

    /// Empty the result channel after a worker has been joined. A search
    /// that finished in the window before `cancel` landed has already
    /// queued its outcome; anything still buffered here belongs to a
    /// torn-down run and must never reach `handle_search_outcome`.
    fn discard_stale_outcomes(&mut self) {
        while let Ok(outcome) = self.search_rx.try_recv() {
            debug!(?outcome, "discarding outcome of a torn-down search");
        }
    }

    fn handle_proposal(&mut self, source: SeatKind, mv: Move) {
        let resting = self.phase;
        if !matches!(resting, Phase::AwaitingMove | Phase::ContinuingSamePlayer) {
            debug!(%mv, phase = ?resting, "proposal outside of a turn");
            self.bus.publish(GameEvent::InvalidMove { mv });
            return;
        }
        let mover = self.state.current_player();
        if mover.kind() != source {
            // A remote peer moving out of turn is a protocol fault worth
            // noting; a local double-click is routine.
            if source == SeatKind::Remote {
                warn!(%mv, "peer proposed a move out of turn");
            }
            self.bus.publish(GameEvent::InvalidMove { mv });
            return;
        }

        self.phase = Phase::Validating;
        if !rules::is_valid_move(&self.state, mv.from, mv.to) {
            debug!(%mv, "rejected invalid move");
            self.bus.publish(GameEvent::InvalidMove { mv });
            self.phase = resting;
            return;
        }

        self.phase = Phase::Applying;
        let applied = rules::apply_move(&mut self.state, mv.from, mv.to);
        debug_assert!(self.state.counters_consistent());
        self.bus.publish(GameEvent::Moved { mv });
        if let Some(at) = applied.captured {
            self.bus.publish(GameEvent::Captured { at });
        }
        if applied.promoted {
            self.bus.publish(GameEvent::Promoted { at: mv.to });
        }

        if applied.continues {
            // The same player must jump again; if that seat is the
            // engine, think again from the new position immediately.
            self.phase = Phase::ContinuingSamePlayer;
            self.maybe_start_search();
            return;
        }

        rules::change_turn(&mut self.state, self.clock.lap());
        self.bus.publish(GameEvent::TurnChanged {
            to: self.state.turn(),
        });
        self.phase = Phase::CheckingEnd;
        if rules::game_ended(&self.state) {
            let winner = rules::winner(&self.state).map(|p| p.color());
            info!(?winner, "game over");
            self.clock.pause();
            self.phase = Phase::GameOver;
            self.bus.publish(GameEvent::GameEnd { winner });
            return;
        }
        self.phase = Phase::AwaitingMove;
        // Artificial mover: think. Remote mover: wait for the peer's
        // message. Local mover: wait for input.
        self.maybe_start_search();
    }

    /// Feed a finished search back into the turn cycle.
    pub fn handle_search_outcome(&mut self, outcome: SearchOutcome) -> Result<(), GameError> {
        self.engine.join();
        match outcome {
            SearchOutcome::Cancelled => {
                debug!("discarding cancelled search result");
                Ok(())
            }
            SearchOutcome::NoMove => {
                if rules::game_ended(&self.state) {
                    // Legitimate terminal position; the turn handler
                    // already announced the end.
                    Ok(())
                } else {
                    error!("search reported no move in a live position");
                    Err(GameError::NoMoveFound)
                }
            }
            SearchOutcome::Best { mv, score } => {
                debug!(%mv, score, "applying engine move");
                self.handle_proposal(SeatKind::Artificial, mv);
                Ok(())
            }
        }
    }

    fn maybe_start_search(&mut self) {
        let awaiting = matches!(
            self.phase,
            Phase::AwaitingMove | Phase::ContinuingSamePlayer
        );
        if awaiting && self.state.current_player().is_artificial() {
            self.engine.start(&self.state, &self.params);
        }
    }
}
