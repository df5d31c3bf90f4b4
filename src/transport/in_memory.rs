use tokio::sync::mpsc;

use crate::transport::{FrameReader, FrameWriter, Transport};

/// In-process duplex link, mostly for tests and the simulator.
pub struct InMemoryTransport {
    reader: InMemoryReader,
    writer: InMemoryWriter,
}

pub struct InMemoryReader {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

pub struct InMemoryWriter {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl InMemoryTransport {
    /// Two connected ends; whatever one sends the other receives.
    pub fn pair() -> (Self, Self) {
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        (
            Self {
                reader: InMemoryReader { rx: rx1 },
                writer: InMemoryWriter { tx: tx2 },
            },
            Self {
                reader: InMemoryReader { rx: rx2 },
                writer: InMemoryWriter { tx: tx1 },
            },
        )
    }
}

#[async_trait::async_trait]
impl FrameReader for InMemoryReader {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl FrameWriter for InMemoryWriter {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.tx
            .send(frame.to_vec())
            .map_err(|_| anyhow::anyhow!("Channel closed"))
    }
}

#[async_trait::async_trait]
impl FrameReader for InMemoryTransport {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        self.reader.recv().await
    }
}

#[async_trait::async_trait]
impl FrameWriter for InMemoryTransport {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.writer.send(frame).await
    }
}

impl Transport for InMemoryTransport {
    fn into_split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>) {
        let this = *self;
        (Box::new(this.reader), Box::new(this.writer))
    }
}
