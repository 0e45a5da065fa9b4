//! Client side of the move exchange: sends the position after the human's
//! move and waits for the service's reply.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::engine::Board;
use crate::protocol::{Message, MovePayload, PROTOCOL_VERSION};
use crate::transport::{Connector, Transport};

/// Failure to obtain the remote move.
#[derive(Debug)]
pub enum RemoteMoveError {
    /// Another request is already outstanding.
    Busy,
    /// The transport failed: unreachable service, dropped connection, timeout.
    Transport(anyhow::Error),
    /// The service answered but refused to move.
    Rejected(String),
    /// The reply could not be understood.
    Malformed(String),
}

impl fmt::Display for RemoteMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteMoveError::Busy => write!(f, "A move request is already in flight"),
            RemoteMoveError::Transport(e) => write!(f, "Move service unreachable: {}", e),
            RemoteMoveError::Rejected(reason) => {
                write!(f, "Move service rejected the request: {}", reason)
            }
            RemoteMoveError::Malformed(detail) => {
                write!(f, "Malformed reply from move service: {}", detail)
            }
        }
    }
}

impl std::error::Error for RemoteMoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RemoteMoveError::Transport(e) => Some(&**e),
            _ => None,
        }
    }
}

/// Source of the opposing player's moves.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Ask for the reply to the position `board` reached after `ply` moves.
    async fn request_move(&mut self, board: Board, ply: u8) -> Result<MovePayload, RemoteMoveError>;
}

/// Shared flag marking a request as in flight.
#[derive(Debug, Clone, Default)]
pub struct PendingFlag(Arc<AtomicBool>);

impl PendingFlag {
    /// A lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while a request is outstanding.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag unless it is already raised. The flag drops again
    /// when the returned guard goes out of scope.
    pub fn try_acquire(&self) -> Option<PendingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PendingGuard(self.0.clone()))
    }
}

/// Clears its [`PendingFlag`] on drop, including when the request future is
/// dropped mid-flight.
pub struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Requests moves from a remote move service over a [`Transport`].
///
/// The handshake runs lazily before the first request on each connection.
/// A transport failure or unreadable reply drops the connection; clients
/// built with a connector redial on the next request. When a held connection
/// fails, such a client redials and resends the request once before giving up.
pub struct RemoteMoveClient<T: Transport> {
    transport: Option<T>,
    connector: Option<Box<dyn Connector<T>>>,
    handshaken: bool,
    seq: u64,
    pending: PendingFlag,
}

impl<T: Transport> RemoteMoveClient<T> {
    /// Client over an already connected transport. It cannot reconnect.
    pub fn new(transport: T) -> Self {
        Self {
            transport: Some(transport),
            connector: None,
            handshaken: false,
            seq: 0,
            pending: PendingFlag::new(),
        }
    }

    /// Client that dials through `connector` on first use and after every
    /// dropped connection.
    pub fn with_connector(connector: impl Connector<T> + 'static) -> Self {
        Self {
            transport: None,
            connector: Some(Box::new(connector)),
            handshaken: false,
            seq: 0,
            pending: PendingFlag::new(),
        }
    }

    /// Handle for observing whether a request is in flight.
    pub fn pending(&self) -> PendingFlag {
        self.pending.clone()
    }

    /// `true` while a transport is held.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    fn disconnect(&mut self) {
        self.transport = None;
        self.handshaken = false;
    }

    async fn ensure_session(&mut self) -> Result<(), RemoteMoveError> {
        if self.transport.is_none() {
            let connector = self.connector.as_ref().ok_or_else(|| {
                RemoteMoveError::Transport(anyhow::anyhow!("Not connected to a move service"))
            })?;
            let transport = connector.connect().await.map_err(RemoteMoveError::Transport)?;
            info!("connected to move service");
            self.transport = Some(transport);
            self.handshaken = false;
        }
        if !self.handshaken {
            self.handshake().await?;
        }
        Ok(())
    }

    async fn handshake(&mut self) -> Result<(), RemoteMoveError> {
        let transport = self.transport.as_mut().ok_or_else(|| {
            RemoteMoveError::Transport(anyhow::anyhow!("Not connected to a move service"))
        })?;
        transport
            .send(Message::Handshake {
                version: PROTOCOL_VERSION,
            })
            .await
            .map_err(RemoteMoveError::Transport)?;
        match transport.recv().await.map_err(RemoteMoveError::Transport)? {
            Message::HandshakeAck { version } if version == PROTOCOL_VERSION => {
                debug!("handshake complete (version {})", version);
                self.handshaken = true;
                Ok(())
            }
            Message::HandshakeAck { version } => Err(RemoteMoveError::Malformed(format!(
                "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                PROTOCOL_VERSION, version
            ))),
            other => Err(RemoteMoveError::Malformed(format!(
                "Expected HandshakeAck, got {:?}",
                other
            ))),
        }
    }

    async fn exchange(&mut self, state: MovePayload) -> Result<MovePayload, RemoteMoveError> {
        self.ensure_session().await?;
        let seq = self.seq;
        self.seq += 1;

        let transport = self.transport.as_mut().ok_or_else(|| {
            RemoteMoveError::Transport(anyhow::anyhow!("Not connected to a move service"))
        })?;
        debug!("requesting move seq {} at turn {}", seq, state.turn);
        transport
            .send(Message::MoveRequest {
                version: PROTOCOL_VERSION,
                seq,
                state,
            })
            .await
            .map_err(RemoteMoveError::Transport)?;

        match transport.recv().await.map_err(RemoteMoveError::Transport)? {
            Message::MoveResponse {
                version,
                seq: resp_seq,
                state,
            } if version == PROTOCOL_VERSION && resp_seq == seq => Ok(state),
            Message::MoveResponse { version, .. } if version != PROTOCOL_VERSION => {
                Err(RemoteMoveError::Malformed(format!(
                    "Protocol version mismatch in MoveResponse: expected {}, got {}",
                    PROTOCOL_VERSION, version
                )))
            }
            Message::MoveResponse { seq: resp_seq, .. } => Err(RemoteMoveError::Malformed(format!(
                "Sequence mismatch in MoveResponse: expected {}, got {}",
                seq, resp_seq
            ))),
            Message::MoveRejected {
                seq: resp_seq,
                reason,
                ..
            } if resp_seq == seq => Err(RemoteMoveError::Rejected(reason)),
            other => Err(RemoteMoveError::Malformed(format!(
                "Expected MoveResponse, got {:?}",
                other
            ))),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> MoveSource for RemoteMoveClient<T> {
    async fn request_move(
        &mut self,
        board: Board,
        ply: u8,
    ) -> Result<MovePayload, RemoteMoveError> {
        let _guard = self.pending.try_acquire().ok_or(RemoteMoveError::Busy)?;
        let payload = MovePayload::new(board, ply);
        let reused = self.transport.is_some();
        let mut result = self.exchange(payload).await;

        // The service may have closed a held connection since the last move.
        // The request carries the whole position, so it is resent once.
        if reused && self.connector.is_some() {
            if let Err(RemoteMoveError::Transport(e)) = &result {
                info!("move service connection went stale ({}); redialling", e);
                self.disconnect();
                result = self.exchange(payload).await;
            }
        }

        match &result {
            Err(e @ (RemoteMoveError::Transport(_) | RemoteMoveError::Malformed(_))) => {
                warn!("dropping move service connection: {}", e);
                self.disconnect();
            }
            Err(e) => warn!("{}", e),
            Ok(reply) => debug!("received move at turn {}", reply.turn),
        }
        result
    }
}
