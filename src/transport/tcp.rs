use std::io::ErrorKind;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{Connector, Transport};

/// Default timeout for a single frame read or write (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum frame size (10 MB) to prevent excessive memory allocation.
pub const MAX_MESSAGE_SIZE: u32 = 10_000_000;

/// Frames `Message`s over TCP as a 4-byte big-endian length followed by a
/// bincode body.
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_MESSAGE_SIZE)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self::with_config(stream, timeout_duration, MAX_MESSAGE_SIZE)
    }

    pub fn with_config(
        stream: TcpStream,
        timeout_duration: Duration,
        max_message_size: u32,
    ) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn write_error(e: std::io::Error) -> anyhow::Error {
    if e.kind() == ErrorKind::BrokenPipe || e.kind() == ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

fn read_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        _ => anyhow::anyhow!("Read error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let max = self.max_message_size;
        let dur = self.timeout_duration;
        let stream = &mut self.stream;
        let send_op = async move {
            let data = bincode::serialize(&msg)
                .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;

            if data.len() > max as usize {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    data.len(),
                    max
                ));
            }

            let len = (data.len() as u32).to_be_bytes();
            stream.write_all(&len).await.map_err(write_error)?;
            stream.write_all(&data).await.map_err(write_error)?;
            stream.flush().await.map_err(write_error)?;
            anyhow::Ok(())
        };

        timeout(dur, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", dur))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let dur = self.timeout_duration;
        let stream = &mut self.stream;
        let recv_op = async move {
            let mut len_buf = [0u8; 4];
            stream.read_exact(&mut len_buf).await.map_err(read_error)?;

            let len = u32::from_be_bytes(len_buf);
            if len > max {
                return Err(anyhow::anyhow!(
                    "Message too large: {} bytes (max: {})",
                    len,
                    max
                ));
            }
            if len == 0 {
                return Err(anyhow::anyhow!("Invalid message length: 0"));
            }

            let mut buf = vec![0u8; len as usize];
            stream.read_exact(&mut buf).await.map_err(read_error)?;

            let msg: Message = bincode::deserialize(&buf)
                .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };

        timeout(dur, recv_op)
            .await
            .map_err(|_| anyhow::anyhow!("Receive timeout after {:?}", dur))?
    }
}

/// Dials a fixed address for every new connection.
#[derive(Debug, Clone)]
pub struct TcpConnector {
    addr: String,
    timeout_duration: Duration,
}

impl TcpConnector {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout_duration: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout_duration: Duration) -> Self {
        self.timeout_duration = timeout_duration;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[async_trait::async_trait]
impl Connector<TcpTransport> for TcpConnector {
    async fn connect(&self) -> anyhow::Result<TcpTransport> {
        let stream = timeout(self.timeout_duration, TcpStream::connect(&self.addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connect timeout after {:?}", self.timeout_duration))?
            .map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", self.addr, e))?;
        Ok(TcpTransport::with_timeout(stream, self.timeout_duration))
    }
}
