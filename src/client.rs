#![cfg(feature = "std")]

//! Typed client side of the wire protocol.

use std::net::SocketAddr;

use tokio::net::ToSocketAddrs;

use crate::{
    protocol::{decode, encode, ClientMessage, ServerMessage, StateSnapshot},
    role::Role,
    transport::{tcp::TcpTransport, FrameReader, FrameWriter, Transport},
};

pub struct GameClient<T: Transport> {
    transport: T,
}

impl GameClient<TcpTransport> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        Ok(Self::new(TcpTransport::connect(addr).await?))
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.transport.peer_addr()
    }
}

impl<T: Transport> GameClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> anyhow::Result<()> {
        let frame = encode(msg)?;
        self.transport.send(&frame).await
    }

    /// Send a frame as-is, bypassing encoding.
    pub async fn send_raw(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.transport.send(frame).await
    }

    pub async fn play(&mut self, index: i64) -> anyhow::Result<()> {
        self.send(&ClientMessage::Move { index }).await
    }

    pub async fn reset(&mut self) -> anyhow::Result<()> {
        self.send(&ClientMessage::Reset).await
    }

    pub async fn recv(&mut self) -> anyhow::Result<ServerMessage> {
        let frame = self.transport.recv().await?;
        Ok(decode(&frame)?)
    }

    /// Wait for the role assignment; fails on any other message.
    pub async fn recv_assign(&mut self) -> anyhow::Result<Role> {
        match self.recv().await? {
            ServerMessage::Assign { symbol } => Ok(symbol),
            other => Err(anyhow::anyhow!("Expected assign, got {:?}", other)),
        }
    }

    /// Wait for the next state broadcast, skipping anything else.
    pub async fn recv_state(&mut self) -> anyhow::Result<StateSnapshot> {
        loop {
            if let ServerMessage::State(snapshot) = self.recv().await? {
                return Ok(snapshot);
            }
        }
    }
}
