use alloc::{format, string::String};

use crate::{
    common::{Mark, Outcome},
    role::Seats,
};

/// Text shown while a player seat is empty.
pub const WAITING_TEXT: &str = "Waiting for two players to connect…";

/// Derived, never stored, session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fewer than two players are connected.
    Waiting,
    Won(Mark),
    Draw,
    /// Game running; it is this mark's turn.
    Turn(Mark),
}

/// Derive the status. Missing players take priority over any outcome.
pub fn derive_status(seats: Seats, outcome: Outcome, active: Mark) -> Status {
    if !seats.both() {
        return Status::Waiting;
    }
    match outcome {
        Outcome::Win(mark) => Status::Won(mark),
        Outcome::Draw => Status::Draw,
        Outcome::None => Status::Turn(active),
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Status::Waiting => f.write_str(WAITING_TEXT),
            Status::Won(mark) => write!(f, "Player {} Wins!", mark),
            Status::Draw => f.write_str("It's a Draw!"),
            Status::Turn(mark) => write!(f, "Player {}'s Turn", mark),
        }
    }
}

/// Status line broadcast alongside every snapshot.
pub fn status_text(seats: Seats, outcome: Outcome, active: Mark) -> String {
    format!("{}", derive_status(seats, outcome, active))
}
