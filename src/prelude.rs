//! Commonly used types and utilities for ease of import.

pub use crate::engine::{
    find_best_move, Board, GameState, GameStatus, IllegalMoveError, Mark, TurnMachine, TurnState,
};

#[cfg(feature = "std")]
pub use crate::{
    client::{MoveSource, RemoteMoveClient, RemoteMoveError},
    controller::{GameController, GameView, MoveOutcome},
    protocol::{MoveApi, MovePayload},
    server::MoveServer,
    service::MinimaxEngine,
};

#[cfg(feature = "std")]
pub use crate::transport::{
    in_memory::InMemoryTransport,
    tcp::{TcpConnector, TcpTransport},
    Transport,
};
