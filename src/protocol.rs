//! Wire protocol between the game client and the move service.

pub mod domain;

pub use domain::MovePayload;

/// Version exchanged in the handshake and stamped on every move frame.
pub const PROTOCOL_VERSION: u8 = 1;

/// Messages exchanged between the game client and a remote move service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Opens a session.
    Handshake { version: u8 },
    /// Accepts a session.
    HandshakeAck { version: u8 },
    /// Asks the service to play its move on the carried position.
    MoveRequest {
        version: u8,
        seq: u64,
        state: MovePayload,
    },
    /// Position after the service's move; `seq` echoes the request.
    MoveResponse {
        version: u8,
        seq: u64,
        state: MovePayload,
    },
    /// The service could not produce a move for request `seq`.
    MoveRejected {
        version: u8,
        seq: u64,
        reason: String,
    },
}

/// Contract of a move-generation service: given the position after the
/// human's move, return the position after the service's reply.
#[async_trait::async_trait]
pub trait MoveApi: Send {
    async fn next_move(&mut self, state: MovePayload) -> anyhow::Result<MovePayload>;
}
