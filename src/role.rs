//! Connection registry and deterministic seat assignment.

use alloc::collections::BTreeSet;

use crate::common::Mark;

/// Capacity a connection holds within the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[cfg_attr(feature = "std", serde(rename = "A"))]
    PlayerA,
    #[cfg_attr(feature = "std", serde(rename = "B"))]
    PlayerB,
    #[cfg_attr(feature = "std", serde(rename = "S"))]
    Spectator,
}

impl Role {
    /// The mark this role places, or `None` for spectators.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Role::PlayerA => Some(Mark::A),
            Role::PlayerB => Some(Mark::B),
            Role::Spectator => None,
        }
    }

    /// The player role that owns `mark`.
    pub fn for_mark(mark: Mark) -> Role {
        match mark {
            Mark::A => Role::PlayerA,
            Mark::B => Role::PlayerB,
        }
    }

    pub fn is_player(self) -> bool {
        self.mark().is_some()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::PlayerA => write!(f, "A"),
            Role::PlayerB => write!(f, "B"),
            Role::Spectator => write!(f, "S"),
        }
    }
}

/// Opaque identity of one live connection. Ids are handed out in connect
/// order and never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u64);

impl core::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which player seats are currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Seats {
    pub a: bool,
    pub b: bool,
}

impl Seats {
    pub fn both(self) -> bool {
        self.a && self.b
    }
}

/// Live connections and their roles.
///
/// Each player seat is a single `Option`, so two holders of the same seat
/// cannot be represented.
#[derive(Debug, Default, Clone)]
pub struct RoleRegistry {
    player_a: Option<ConnectionId>,
    player_b: Option<ConnectionId>,
    spectators: BTreeSet<ConnectionId>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` and give it the first free seat, falling back to
    /// spectator. Registering an id twice returns its existing role.
    pub fn assign(&mut self, id: ConnectionId) -> Role {
        if let Some(role) = self.role_of(id) {
            return role;
        }
        if self.player_a.is_none() {
            self.player_a = Some(id);
            Role::PlayerA
        } else if self.player_b.is_none() {
            self.player_b = Some(id);
            Role::PlayerB
        } else {
            self.spectators.insert(id);
            Role::Spectator
        }
    }

    /// Remove `id`, returning the role it held. Freed seats stay empty until
    /// the next new connection; waiting spectators are not promoted.
    pub fn release(&mut self, id: ConnectionId) -> Option<Role> {
        if self.player_a == Some(id) {
            self.player_a = None;
            Some(Role::PlayerA)
        } else if self.player_b == Some(id) {
            self.player_b = None;
            Some(Role::PlayerB)
        } else if self.spectators.remove(&id) {
            Some(Role::Spectator)
        } else {
            None
        }
    }

    pub fn role_of(&self, id: ConnectionId) -> Option<Role> {
        if self.player_a == Some(id) {
            Some(Role::PlayerA)
        } else if self.player_b == Some(id) {
            Some(Role::PlayerB)
        } else if self.spectators.contains(&id) {
            Some(Role::Spectator)
        } else {
            None
        }
    }

    /// Connection holding the seat for `mark`.
    pub fn holder(&self, mark: Mark) -> Option<ConnectionId> {
        match mark {
            Mark::A => self.player_a,
            Mark::B => self.player_b,
        }
    }

    pub fn seats(&self) -> Seats {
        Seats {
            a: self.player_a.is_some(),
            b: self.player_b.is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.player_a.iter().count() + self.player_b.iter().count() + self.spectators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
