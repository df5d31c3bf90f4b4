#![cfg(feature = "std")]

//! The single serialization point for every state-affecting event.
//!
//! [`Session`] is the synchronous core: it owns the board and the role
//! registry and turns each event into [`Dispatch`] instructions.
//! [`SessionController`] wraps it in a task that consumes events from one
//! ordered channel, so no two events ever interleave.

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::{
    board::Board,
    broadcast::{Broadcaster, Outbox},
    common::Rejection,
    config::ResetPolicy,
    protocol::{ClientMessage, ServerMessage, StateSnapshot},
    role::{ConnectionId, Role, RoleRegistry},
    validator::{apply_move, validate_reset},
};

/// Delivery instruction produced by the session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Unicast(ConnectionId, ServerMessage),
    Broadcast(ServerMessage),
}

pub struct Session {
    board: Board,
    registry: RoleRegistry,
    reset_policy: ResetPolicy,
    next_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ResetPolicy::default())
    }
}

impl Session {
    pub fn new(reset_policy: ResetPolicy) -> Self {
        Self {
            board: Board::new(),
            registry: RoleRegistry::new(),
            reset_policy,
            next_id: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.board, self.registry.seats())
    }

    fn broadcast_state(&self) -> Dispatch {
        Dispatch::Broadcast(ServerMessage::State(self.snapshot()))
    }

    /// Register a new connection. Yields the role unicast followed by a
    /// state broadcast.
    pub fn connect(&mut self) -> (ConnectionId, Role, Vec<Dispatch>) {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        let role = self.registry.assign(id);
        let dispatches = vec![
            Dispatch::Unicast(id, ServerMessage::Assign { symbol: role }),
            self.broadcast_state(),
        ];
        (id, role, dispatches)
    }

    /// Apply one client intent. A rejection mutates nothing and must not be
    /// broadcast.
    pub fn handle(&mut self, id: ConnectionId, msg: ClientMessage) -> Result<Dispatch, Rejection> {
        match msg {
            ClientMessage::Move { index } => {
                let outcome = apply_move(&mut self.board, &self.registry, id, index)?;
                debug!("{} placed at {} -> {:?}", id, index, outcome);
            }
            ClientMessage::Reset => {
                let role = validate_reset(&self.registry, id, self.reset_policy)?;
                self.board.reset();
                debug!("{} ({}) reset the board", id, role);
            }
        }
        Ok(self.broadcast_state())
    }

    /// Remove a connection. Losing a player forces a reset. Returns `None`
    /// when the id was already gone.
    pub fn disconnect(&mut self, id: ConnectionId) -> Option<Dispatch> {
        let role = self.registry.release(id)?;
        if role.is_player() {
            self.board.reset();
            info!("Player {} left ({}); board reset", role, id);
        }
        Some(self.broadcast_state())
    }
}

/// Events funnelled into the controller.
pub enum SessionEvent {
    Connect {
        outbox: Outbox,
        reply: oneshot::Sender<(ConnectionId, Role)>,
    },
    Intent {
        id: ConnectionId,
        msg: ClientMessage,
    },
    Disconnect {
        id: ConnectionId,
    },
    Snapshot {
        reply: oneshot::Sender<StateSnapshot>,
    },
}

/// Task owning the [`Session`] and the per-connection outboxes.
pub struct SessionController {
    session: Session,
    broadcaster: Broadcaster,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionController {
    /// Start the controller task. It stops once every handle is dropped.
    pub fn spawn(reset_policy: ResetPolicy) -> (SessionHandle, JoinHandle<()>) {
        let (tx, events) = mpsc::unbounded_channel();
        let controller = Self {
            session: Session::new(reset_policy),
            broadcaster: Broadcaster::new(),
            events,
        };
        let task = tokio::spawn(controller.run());
        (SessionHandle { tx }, task)
    }

    async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            self.process(event);
        }
        debug!("Session controller stopped");
    }

    fn process(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Connect { outbox, reply } => {
                let (id, role, dispatches) = self.session.connect();
                if reply.send((id, role)).is_err() {
                    // Nobody will ever run this connection or disconnect it.
                    debug!("Join for {} was abandoned; releasing {}", id, role);
                    if let Some(dispatch) = self.session.disconnect(id) {
                        self.broadcaster.deliver(dispatch);
                    }
                    return;
                }
                self.broadcaster.register(id, outbox);
                info!("Connection {} joined as {}", id, role);
                for dispatch in dispatches {
                    self.broadcaster.deliver(dispatch);
                }
            }
            SessionEvent::Intent { id, msg } => match self.session.handle(id, msg) {
                Ok(dispatch) => self.broadcaster.deliver(dispatch),
                Err(reason) => debug!("Dropped intent from {}: {}", id, reason),
            },
            SessionEvent::Disconnect { id } => {
                self.broadcaster.unregister(id);
                if let Some(dispatch) = self.session.disconnect(id) {
                    info!("Connection {} closed", id);
                    self.broadcaster.deliver(dispatch);
                }
            }
            SessionEvent::Snapshot { reply } => {
                let _ = reply.send(self.session.snapshot());
            }
        }
    }
}

/// Cloneable sender side of the controller's event queue.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    fn submit(&self, event: SessionEvent) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .map_err(|_| anyhow::anyhow!("Session controller has stopped"))
    }

    /// Register a connection whose outbound frames go to `outbox`.
    pub async fn connect(&self, outbox: Outbox) -> anyhow::Result<(ConnectionId, Role)> {
        let (reply, rx) = oneshot::channel();
        self.submit(SessionEvent::Connect { outbox, reply })?;
        rx.await
            .map_err(|_| anyhow::anyhow!("Session controller dropped the connect request"))
    }

    pub fn intent(&self, id: ConnectionId, msg: ClientMessage) -> anyhow::Result<()> {
        self.submit(SessionEvent::Intent { id, msg })
    }

    pub fn disconnect(&self, id: ConnectionId) -> anyhow::Result<()> {
        self.submit(SessionEvent::Disconnect { id })
    }

    /// Current state as seen after every event queued before this call.
    pub async fn snapshot(&self) -> anyhow::Result<StateSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.submit(SessionEvent::Snapshot { reply })?;
        rx.await
            .map_err(|_| anyhow::anyhow!("Session controller dropped the snapshot request"))
    }
}
