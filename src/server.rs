use anyhow::anyhow;
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio::time::Duration;

use crate::protocol::{Message, MoveApi, PROTOCOL_VERSION};
use crate::transport::{tcp::TcpTransport, Transport};

/// How long a server waits for a client's next request before closing
/// the session. Covers a human thinking over their move.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Serves one client connection, answering move requests with `engine`.
pub struct MoveServer<E: MoveApi, T: Transport> {
    engine: E,
    transport: T,
}

impl<E: MoveApi, T: Transport> MoveServer<E, T> {
    pub fn new(engine: E, transport: T) -> Self {
        Self { engine, transport }
    }

    /// Run the session until the client disconnects.
    ///
    /// A version mismatch in the handshake is acknowledged with our own
    /// version and then closes the session.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Handshake { version } => {
                self.transport
                    .send(Message::HandshakeAck {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
                if version != PROTOCOL_VERSION {
                    return Err(anyhow!(
                        "Protocol version mismatch in Handshake: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ));
                }
            }
            other => return Err(anyhow!("Expected handshake, got {:?}", other)),
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) => {
                    debug!("session ended: {}", e);
                    break;
                }
            };
            let reply = match msg {
                Message::MoveRequest {
                    version,
                    seq,
                    state,
                } if version == PROTOCOL_VERSION => match self.engine.next_move(state).await {
                    Ok(state) => Message::MoveResponse {
                        version: PROTOCOL_VERSION,
                        seq,
                        state,
                    },
                    Err(e) => {
                        warn!("rejecting move request {}: {}", seq, e);
                        Message::MoveRejected {
                            version: PROTOCOL_VERSION,
                            seq,
                            reason: e.to_string(),
                        }
                    }
                },
                Message::MoveRequest { version, seq, .. } => Message::MoveRejected {
                    version: PROTOCOL_VERSION,
                    seq,
                    reason: format!("Unsupported protocol version {}", version),
                },
                Message::Handshake { .. } => Message::HandshakeAck {
                    version: PROTOCOL_VERSION,
                },
                other => {
                    return Err(anyhow!(
                        "Unexpected message from client: {:?} (closing session)",
                        other
                    ))
                }
            };
            self.transport.send(reply).await?;
        }
        Ok(())
    }
}

/// Accept clients on `listener` forever, serving each connection on its own
/// task with a fresh engine from `make_engine`.
///
/// Sessions belong to the returned future: dropping or aborting it ends every
/// session still running.
pub async fn serve<E, F>(listener: TcpListener, make_engine: F) -> anyhow::Result<()>
where
    E: MoveApi + 'static,
    F: Fn() -> E,
{
    let mut sessions = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = accepted?;
                info!("client connected from {}", addr);
                let transport = TcpTransport::with_timeout(stream, SESSION_IDLE_TIMEOUT);
                let mut server = MoveServer::new(make_engine(), transport);
                sessions.spawn(async move {
                    match server.run().await {
                        Ok(()) => info!("client {} disconnected", addr),
                        Err(e) => warn!("session with {} ended with an error: {}", addr, e),
                    }
                });
            }
            Some(finished) = sessions.join_next(), if !sessions.is_empty() => {
                if let Err(e) = finished {
                    warn!("session task failed: {}", e);
                }
            }
        }
    }
}
