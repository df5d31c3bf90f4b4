use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::config::{DEFAULT_MAX_FRAME_SIZE, DEFAULT_SEND_TIMEOUT_MS};
use crate::transport::{FrameReader, FrameWriter, Transport};

/// Length-prefixed frames over TCP: a 4-byte big-endian length, then the
/// payload. Receives never time out; a peer may sit idle indefinitely.
pub struct TcpTransport {
    reader: TcpFrameReader,
    writer: TcpFrameWriter,
    peer: Option<SocketAddr>,
}

pub struct TcpFrameReader {
    half: OwnedReadHalf,
    max_frame_size: u32,
}

pub struct TcpFrameWriter {
    half: OwnedWriteHalf,
    max_frame_size: u32,
    send_timeout: Duration,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(
            stream,
            DEFAULT_MAX_FRAME_SIZE,
            Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
        )
    }

    pub fn with_config(stream: TcpStream, max_frame_size: u32, send_timeout: Duration) -> Self {
        let peer = stream.peer_addr().ok();
        let (read, write) = stream.into_split();
        Self {
            reader: TcpFrameReader {
                half: read,
                max_frame_size,
            },
            writer: TcpFrameWriter {
                half: write,
                max_frame_size,
                send_timeout,
            },
            peer,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }
}

fn map_io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::UnexpectedEof => anyhow::anyhow!("Connection closed by peer"),
        std::io::ErrorKind::ConnectionReset => anyhow::anyhow!("Connection reset by peer"),
        std::io::ErrorKind::BrokenPipe => anyhow::anyhow!("Connection closed by peer"),
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl FrameReader for TcpFrameReader {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut len_buf = [0u8; 4];
        self.half.read_exact(&mut len_buf).await.map_err(map_io_error)?;

        let len = u32::from_be_bytes(len_buf);
        // The stream cannot be resynchronised after a bad length prefix.
        if len == 0 {
            return Err(anyhow::anyhow!("Invalid frame length: 0"));
        }
        if len > self.max_frame_size {
            return Err(anyhow::anyhow!(
                "Frame too large: {} bytes (max: {})",
                len,
                self.max_frame_size
            ));
        }

        let mut buf = vec![0u8; len as usize];
        self.half.read_exact(&mut buf).await.map_err(map_io_error)?;
        Ok(buf)
    }
}

#[async_trait::async_trait]
impl FrameWriter for TcpFrameWriter {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        if frame.is_empty() {
            return Err(anyhow::anyhow!("Refusing to send an empty frame"));
        }
        let len = u32::try_from(frame.len())
            .ok()
            .filter(|&n| n <= self.max_frame_size)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Frame too large: {} bytes (max: {})",
                    frame.len(),
                    self.max_frame_size
                )
            })?;

        let send_op = async {
            self.half
                .write_all(&len.to_be_bytes())
                .await
                .map_err(map_io_error)?;
            self.half.write_all(frame).await.map_err(map_io_error)?;
            self.half.flush().await.map_err(map_io_error)?;
            anyhow::Ok(())
        };

        timeout(self.send_timeout, send_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.send_timeout))?
    }
}

#[async_trait::async_trait]
impl FrameReader for TcpTransport {
    async fn recv(&mut self) -> anyhow::Result<Vec<u8>> {
        self.reader.recv().await
    }
}

#[async_trait::async_trait]
impl FrameWriter for TcpTransport {
    async fn send(&mut self, frame: &[u8]) -> anyhow::Result<()> {
        self.writer.send(frame).await
    }
}

impl Transport for TcpTransport {
    fn into_split(self: Box<Self>) -> (Box<dyn FrameReader>, Box<dyn FrameWriter>) {
        let this = *self;
        (Box::new(this.reader), Box::new(this.writer))
    }
}
