use crate::protocol::Message;

/// Bidirectional channel carrying protocol frames.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

/// Opens fresh transports, letting a client recover from a dropped
/// connection.
#[async_trait::async_trait]
pub trait Connector<T: Transport>: Send + Sync {
    async fn connect(&self) -> anyhow::Result<T>;
}

pub mod in_memory;
pub mod tcp;
