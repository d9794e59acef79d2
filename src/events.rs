//! Typed game notifications.
//!
//! The coordinator broadcasts these to registered subscribers (a board
//! view, a network bridge, a logger). Notifications only: subscribers own
//! no game state and nothing is expected back.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::board::{Color, Move, Position};

/// Something observable happened to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began; `first` is the side to move.
    GameStart { first: Color },
    /// A piece moved (every applied move, captures included).
    Moved { mv: Move },
    /// The piece at `at` was removed from the board.
    Captured { at: Position },
    /// The man at `at` became a king.
    Promoted { at: Position },
    /// The turn passed; `to` is the new side to move.
    TurnChanged { to: Color },
    /// A proposal was rejected; the proposer may re-prompt or flag a
    /// protocol fault.
    InvalidMove { mv: Move },
    /// The game is over. `None` means neither side could move.
    GameEnd { winner: Option<Color> },
}

/// Fan-out of game events to any number of subscribers.
///
/// Senders that have disconnected are dropped on the next publish. A slow
/// subscriber with a full buffer loses the event rather than blocking the
/// coordinator.
#[derive(Debug, Default)]
pub struct EventBus {
    sinks: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; returns the receiving end.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = crossbeam_channel::bounded(256);
        self.sinks.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&mut self, event: GameEvent) {
        self.sinks.retain(|sink| {
            match sink.try_send(event.clone()) {
                Ok(()) => true,
                // Full buffer: drop this event for the laggard, keep the sink.
                Err(TrySendError::Full(_)) => true,
                Err(TrySendError::Disconnected(_)) => false,
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }
}
