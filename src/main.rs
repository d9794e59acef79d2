//! Terminal front end: parses the command line, runs the turn coordinator
//! on its own thread and bridges stdin to move proposals.

use std::io::{self, BufRead};
use std::thread;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use damista::board::{Move, Position};
use damista::coordinator::{GameConfig, SeatConfig, TurnCoordinator};
use damista::events::GameEvent;
use damista::game::{GameState, SeatKind};
use damista::rules;
use damista::search::Difficulty;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Seat {
    Local,
    Ai,
}

impl Seat {
    fn kind(self) -> SeatKind {
        match self {
            Seat::Local => SeatKind::Local,
            Seat::Ai => SeatKind::Artificial,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Moderate,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Moderate => Difficulty::Moderate,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "damista", version, about = "Checkers with an alpha-beta engine")]
struct Cli {
    /// Seat playing red (moves first, toward row 0).
    #[arg(long, value_enum, default_value_t = Seat::Local)]
    red: Seat,
    /// Seat playing black (moves toward row 7).
    #[arg(long, value_enum, default_value_t = Seat::Ai)]
    black: Seat,
    /// Engine strength.
    #[arg(long, value_enum, default_value_t = Level::Moderate)]
    difficulty: Level,
    /// Fixed search seed for reproducible engine play.
    #[arg(long)]
    seed: Option<u64>,
}

/// Parse "row,col row,col" into a move.
fn parse_move(line: &str) -> Option<Move> {
    let mut squares = line.split_whitespace().map(|part| {
        let (row, col) = part.split_once(',')?;
        Some(Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
    });
    let from = squares.next()??;
    let to = squares.next()??;
    if squares.next().is_some() {
        return None;
    }
    Some(Move::new(from, to))
}

/// Consume game events, keep a display mirror of the position in step with
/// the coordinator and print it after every applied move.
fn print_events(events: crossbeam_channel::Receiver<GameEvent>) {
    let mut mirror = GameState::standard();
    for event in events {
        match event {
            GameEvent::GameStart { first } => {
                mirror.reset();
                println!("{}", mirror.board);
                println!("new game: {first} moves first");
            }
            GameEvent::Moved { mv } => {
                let applied = rules::apply_move(&mut mirror, mv.from, mv.to);
                if !applied.continues {
                    rules::change_turn(&mut mirror, 0);
                }
                println!("{}", mirror.board);
                println!("played {mv}");
            }
            GameEvent::Captured { at } => println!("captured the piece on {at}"),
            GameEvent::Promoted { at } => println!("promoted to king on {at}"),
            GameEvent::TurnChanged { to } => println!("{to} to move"),
            GameEvent::InvalidMove { mv } => println!("illegal move: {mv}"),
            GameEvent::GameEnd { winner } => match winner {
                Some(color) => println!("game over: {color} wins"),
                None => println!("game over: draw"),
            },
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let config = GameConfig {
        red: SeatConfig::new("Red", cli.red.kind()),
        black: SeatConfig::new("Black", cli.black.kind()),
        difficulty: cli.difficulty.into(),
        seed: cli.seed,
    };
    let (mut coordinator, handle) = TurnCoordinator::new(config);
    let events = coordinator.subscribe();

    let printer = thread::Builder::new()
        .name("damista-display".into())
        .spawn(move || print_events(events))
        .expect("failed to spawn display thread");
    let runner = thread::Builder::new()
        .name("damista-coordinator".into())
        .spawn(move || coordinator.run())
        .expect("failed to spawn coordinator thread");

    println!("moves are entered as \"row,col row,col\"; commands: new, quit");
    if handle.start_game().is_err() {
        eprintln!("coordinator unavailable");
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        let sent = match trimmed {
            "" => Ok(()),
            "quit" | "q" => break,
            "new" => handle.start_game(),
            _ => match parse_move(trimmed) {
                Some(mv) => handle.propose(SeatKind::Local, mv),
                None => {
                    println!("could not read that; use \"row,col row,col\"");
                    Ok(())
                }
            },
        };
        if sent.is_err() {
            break;
        }
    }

    let _ = handle.shutdown();
    let _ = runner.join();
    // Dropping the coordinator closed the event bus; the printer drains
    // whatever is left and exits.
    let _ = printer.join();
}
