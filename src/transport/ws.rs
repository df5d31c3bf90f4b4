use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::time::{timeout, Duration};

use crate::config::{DEFAULT_MAX_FRAME_SIZE, DEFAULT_SEND_TIMEOUT_MS};
use crate::transport::{FrameReader, FrameWriter, Transport};

/// One JSON message per WebSocket text frame, as browsers send them.
/// Binary frames are accepted inbound; pings and pongs are skipped.
pub struct WsTransport {
    reader: WsFrameReader,
    writer: WsFrameWriter,
}

pub struct WsFrameReader {
    stream: SplitStream<WebSocket>,
}

pub struct WsFrameWriter {
    sink: SplitSink<WebSocket, Message>,
    max_frame_size: u32,
    send_timeout: Duration,
}

impl WsTransport {
    pub fn new(socket: WebSocket) -> Self {
        Self::with_config(
            socket,
            DEFAULT_MAX_FRAME_SIZE,
            Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
        )
    }

    /// Inbound size limits are enforced by the upgrade; `max_frame_size`
    /// bounds what this side sends.
    pub fn with_config(socket: WebSocket, max_frame_size: u32, send_timeout: Duration) -> Self {
        let (sink, stream) = socket.split();
        Self {
            reader: WsFrameReader { stream },
            writer: WsFrameWriter {
                sink,
                max_frame_size,
                send_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl FrameReader for WsFrameReader {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        loop {
            let message = match self.stream.next().await {
                Some(Ok(message)) => message,
                Some(Err(e)) => return Err(anyhow::anyhow!("WebSocket error: {}", e)),
                None => return Err(anyhow::anyhow!("Connection closed by peer")),
            };
            match message {
                Message::Text(text) => return Ok(text.as_str().as_bytes().to_vec()),
                Message::Binary(bytes) => return Ok(bytes.to_vec()),
                Message::Close(_) => return Err(anyhow::anyhow!("Connection closed by peer")),
                Message::Ping(_) | Message::Pong(_) => continue,
            }
        }
    }
}

#[async_trait::async_trait]
impl FrameWriter for WsFrameWriter {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        if frame.len() > self.max_frame_size as usize {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                frame.len(),
                self.max_frame_size
            ));
        }
        let text = String::from_utf8(frame.to_vec())
            .map_err(|e| anyhow::anyhow!("Frame is not UTF-8 text: {}", e))?;

        timeout(self.send_timeout, self.sink.send(Message::Text(text.into())))
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.send_timeout))?
            .map_err(|e| anyhow::anyhow!("WebSocket error: {}", e))
    }
}

#[async_trait::async_trait]
impl FrameReader for WsTransport {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        self.reader.recv().await
    }
}

#[async_trait::async_trait]
impl FrameWriter for WsTransport {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.writer.send(frame).await
    }
}

impl Transport for WsTransport {
    fn into_split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>) {
        let this = *self;
        (Box::new(this.reader), Box::new(this.writer))
    }
}
