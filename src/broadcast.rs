#![cfg(feature = "std")]

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{error, trace, warn};
use tokio::sync::mpsc;

use crate::{
    protocol::{encode, ServerMessage},
    role::ConnectionId,
    session::Dispatch,
};

/// An encoded message, shared between every outbox it is queued on.
pub type Frame = Arc<[u8]>;

/// Per-connection outbound queue, drained by that connection's writer task.
pub type Outbox = mpsc::UnboundedSender<Frame>;

/// Fans encoded messages out to live connections.
///
/// Queueing never blocks, so a slow or dead peer only affects its own
/// writer task.
#[derive(Default)]
pub struct Broadcaster {
    outboxes: BTreeMap<ConnectionId, Outbox>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ConnectionId, outbox: Outbox) {
        self.outboxes.insert(id, outbox);
    }

    pub fn unregister(&mut self, id: ConnectionId) {
        self.outboxes.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.outboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outboxes.is_empty()
    }

    pub fn deliver(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Unicast(id, msg) => {
                self.unicast(id, &msg);
            }
            Dispatch::Broadcast(msg) => {
                self.publish(&msg);
            }
        }
    }

    /// Queue `msg` for a single connection.
    pub fn unicast(&self, id: ConnectionId, msg: &ServerMessage) -> bool {
        let Some(frame) = encode_frame(msg) else {
            return false;
        };
        match self.outboxes.get(&id) {
            Some(outbox) => send_frame(id, outbox, frame),
            None => false,
        }
    }

    /// Queue an identical frame for every live connection. Returns how many
    /// outboxes accepted it.
    pub fn publish(&self, msg: &ServerMessage) -> usize {
        let Some(frame) = encode_frame(msg) else {
            return 0;
        };
        let mut delivered = 0;
        for (id, outbox) in &self.outboxes {
            if send_frame(*id, outbox, frame.clone()) {
                delivered += 1;
            }
        }
        trace!("Published to {}/{} connections", delivered, self.outboxes.len());
        delivered
    }
}

fn encode_frame(msg: &ServerMessage) -> Option<Frame> {
    match encode(msg) {
        Ok(bytes) => Some(Frame::from(bytes)),
        Err(e) => {
            error!("Failed to encode {:?}: {}", msg, e);
            None
        }
    }
}

fn send_frame(id: ConnectionId, outbox: &Outbox, frame: Frame) -> bool {
    match outbox.send(frame) {
        Ok(()) => true,
        Err(_) => {
            warn!("Outbox for {} is closed; skipping", id);
            false
        }
    }
}
