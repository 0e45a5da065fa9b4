#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
pub mod controller;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod transport;

pub use engine::*;
#[cfg(feature = "std")]
pub use client::{MoveSource, PendingFlag, RemoteMoveClient, RemoteMoveError};
#[cfg(feature = "std")]
pub use controller::{GameController, GameView, MoveOutcome, CONNECTION_ERROR};
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{Message, MoveApi, MovePayload, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use server::{serve, MoveServer};
#[cfg(feature = "std")]
pub use service::MinimaxEngine;
#[cfg(feature = "std")]
pub use transport::tcp::{TcpConnector, TcpTransport};
