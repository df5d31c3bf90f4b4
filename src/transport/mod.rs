//! Message-oriented duplex links to a single peer.
//!
//! A frame is one complete message payload. Transports split into
//! independent halves so a connection can be read and written concurrently.

use alloc::boxed::Box;

/// Receiving half of a transport.
#[async_trait::async_trait]
pub trait FrameReader: Send {
    /// Wait for the next frame. Any error means the link is gone.
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>>;
}

/// Sending half of a transport.
#[async_trait::async_trait]
pub trait FrameWriter: Send {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()>;
}

pub trait Transport: FrameReader + FrameWriter {
    fn into_split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>);
}

pub mod in_memory;
pub mod tcp;
pub mod ws;
