//! Core tic-tac-toe engine (no_std compatible)
//!
//! Pure game logic: the board model, the turn state machine and the minimax
//! search used by the move service. Nothing here performs I/O, so the engine
//! can be driven by any front end or test harness.

pub mod ai;
pub mod board;
pub mod common;
pub mod config;
pub mod game;

// Re-export commonly used types
pub use ai::find_best_move;
pub use board::{Board, Cell};
pub use common::{IllegalMoveError, Mark};
pub use config::*;
pub use game::{GameState, GameStatus, HumanMove, Rejection, TurnMachine, TurnState};
