#![cfg(feature = "std")]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ws::WebSocketUpgrade, ConnectInfo, State},
    response::Response,
    routing::get,
    Router,
};
use log::{debug, info, warn};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::{
    broadcast::Frame,
    config::{ServerConfig, TransportKind, WS_PATH},
    protocol::{decode, ClientMessage},
    role::{ConnectionId, Role},
    session::{SessionController, SessionHandle},
    transport::{tcp::TcpTransport, ws::WsTransport, FrameReader, FrameWriter, Transport},
};

/// A connection that has been registered with the session but whose
/// reader and writer tasks are not running yet.
pub struct Connection {
    id: ConnectionId,
    role: Role,
    reader: Box<dyn FrameReader>,
    writer: Box<dyn FrameWriter>,
    outbound: mpsc::UnboundedReceiver<Frame>,
    session: SessionHandle,
}

impl Connection {
    /// Register `transport` with the session. Roles are assigned in the
    /// order `open` calls complete, so callers open connections in accept
    /// order before spawning them.
    pub async fn open(transport: Box<dyn Transport>, session: &SessionHandle) -> anyhow::Result<Self> {
        let (reader, writer) = transport.into_split();
        let (outbox, outbound) = mpsc::unbounded_channel();
        let (id, role) = session.connect(outbox).await?;
        Ok(Self {
            id,
            role,
            reader,
            writer,
            outbound,
            session: session.clone(),
        })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Pump frames both ways until either direction fails, then tell the
    /// session. Malformed frames are dropped without closing the link.
    pub async fn run(self) -> anyhow::Result<()> {
        let Connection {
            id,
            mut reader,
            mut writer,
            mut outbound,
            session,
            ..
        } = self;

        // A peer that can no longer be written to must not keep its seat.
        let result = tokio::select! {
            result = pump_inbound(id, &mut *reader, &session) => result,
            () = pump_outbound(id, &mut *writer, &mut outbound) => Ok(()),
        };

        session.disconnect(id)?;
        result
    }
}

async fn pump_inbound(
    id: ConnectionId,
    reader: &mut dyn FrameReader,
    session: &SessionHandle,
) -> anyhow::Result<()> {
    loop {
        match reader.recv().await {
            Ok(frame) => match decode::<ClientMessage>(&frame) {
                Ok(msg) => session.intent(id, msg)?,
                Err(e) => debug!("Ignoring frame from {}: {}", id, e),
            },
            Err(e) => {
                debug!("Connection {} closed: {}", id, e);
                return Ok(());
            }
        }
    }
}

async fn pump_outbound(
    id: ConnectionId,
    writer: &mut dyn FrameWriter,
    outbound: &mut mpsc::UnboundedReceiver<Frame>,
) {
    while let Some(frame) = outbound.recv().await {
        if let Err(e) = writer.send(&frame).await {
            warn!("Send to {} failed, dropping the connection: {}", id, e);
            return;
        }
    }
    debug!("Outbox for {} closed", id);
}

async fn spawn_connection(
    transport: Box<dyn Transport>,
    session: &SessionHandle,
    peer: SocketAddr,
) -> anyhow::Result<()> {
    let connection = Connection::open(transport, session).await?;
    info!("Accepted {} from {} as {}", connection.id(), peer, connection.role());
    tokio::spawn(async move {
        if let Err(e) = connection.run().await {
            warn!("Connection task ended with an error: {}", e);
        }
    });
    Ok(())
}

/// Accept length-prefixed TCP connections forever, registering each before
/// the next accept so roles follow arrival order.
pub async fn serve(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let (session, _controller) = SessionController::spawn(config.reset_policy);
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };
        let transport = TcpTransport::with_config(stream, config.max_frame_size, config.send_timeout);
        spawn_connection(Box::new(transport), &session, addr).await?;
    }
}

#[derive(Clone)]
struct WsState {
    session: SessionHandle,
    max_frame_size: u32,
    send_timeout: Duration,
}

/// Serve WebSocket clients on [`WS_PATH`]. Upgrades register in the order
/// the controller receives them.
pub async fn serve_ws(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    let (session, _controller) = SessionController::spawn(config.reset_policy);
    let state = WsState {
        session,
        max_frame_size: config.max_frame_size,
        send_timeout: config.send_timeout,
    };
    let app = Router::new().route(WS_PATH, get(upgrade)).with_state(state);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}

async fn upgrade(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<WsState>,
) -> Response {
    ws.max_message_size(state.max_frame_size as usize)
        .on_upgrade(move |socket| async move {
            let transport = WsTransport::with_config(socket, state.max_frame_size, state.send_timeout);
            if let Err(e) = spawn_connection(Box::new(transport), &state.session, addr).await {
                warn!("WebSocket join failed: {}", e);
            }
        })
}

/// Bind the configured address and serve until the process exits.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    let addr = listener.local_addr()?;
    match config.transport {
        TransportKind::Tcp => {
            info!("Tic-tac-toe session listening on {} (tcp)", addr);
            serve(listener, config).await
        }
        TransportKind::WebSocket => {
            info!("Tic-tac-toe session listening on ws://{}{}", addr, WS_PATH);
            serve_ws(listener, config).await
        }
    }
}
