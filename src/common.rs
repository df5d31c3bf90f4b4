//! Common types for the board: marks, outcomes, and the errors raised when
//! an intent cannot be applied.

/// One of the two marks placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    A,
    B,
}

impl Mark {
    /// The mark that moves first after every reset.
    pub const FIRST: Mark = Mark::A;

    /// The opposing mark.
    pub fn other(self) -> Mark {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }
}

impl core::fmt::Display for Mark {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Mark::A => write!(f, "A"),
            Mark::B => write!(f, "B"),
        }
    }
}

/// Decided result of a game; anything but `None` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    Win(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::None)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Cell index is outside the board.
    OutOfRange,
    /// Cell already holds a mark.
    Occupied,
    /// Game already has an outcome.
    Terminal,
}

impl core::fmt::Display for BoardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BoardError::OutOfRange => write!(f, "Cell index is out of range"),
            BoardError::Occupied => write!(f, "Cell is already occupied"),
            BoardError::Terminal => write!(f, "Game is already over"),
        }
    }
}

/// Why the validator refused an intent. Rejections are never sent back to
/// the client; they only surface in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Game already has an outcome.
    Terminal,
    /// Sender holds the spectator role.
    NotAPlayer,
    /// Sender's mark is not the active mark.
    NotYourTurn,
    /// One of the player seats is empty.
    WaitingForPlayers,
    /// Index outside `[0, BOARD_CELLS)`.
    OutOfRange,
    /// Target cell already holds a mark.
    Occupied,
    /// Reset policy does not allow this sender to reset.
    ResetNotAllowed,
    /// Sender is not registered (already disconnected).
    UnknownConnection,
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Rejection::Terminal => write!(f, "game is already over"),
            Rejection::NotAPlayer => write!(f, "spectators cannot move"),
            Rejection::NotYourTurn => write!(f, "not this player's turn"),
            Rejection::WaitingForPlayers => write!(f, "both players must be connected"),
            Rejection::OutOfRange => write!(f, "cell index is out of range"),
            Rejection::Occupied => write!(f, "cell is already occupied"),
            Rejection::ResetNotAllowed => write!(f, "reset not allowed for this role"),
            Rejection::UnknownConnection => write!(f, "connection is not registered"),
        }
    }
}

impl From<BoardError> for Rejection {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfRange => Rejection::OutOfRange,
            BoardError::Occupied => Rejection::Occupied,
            BoardError::Terminal => Rejection::Terminal,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(feature = "std")]
impl std::error::Error for Rejection {}
