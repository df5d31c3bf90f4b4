use crate::{
    common::{BoardError, Mark, Outcome},
    config::{BOARD_CELLS, WINNING_LINES},
};

/// Cell contents, indexed row-major from the top-left corner.
pub type Cells = [Option<Mark>; BOARD_CELLS];

/// The single shared game state: cells, whose turn it is, and the outcome.
///
/// Once `outcome` is terminal the board refuses every placement until
/// [`Board::reset`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: Cells,
    active: Mark,
    outcome: Outcome,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with the first mark to move.
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            active: Mark::FIRST,
            outcome: Outcome::None,
        }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Contents of one cell, or `None` when the index is off the board.
    pub fn cell(&self, index: usize) -> Option<Option<Mark>> {
        self.cells.get(index).copied()
    }

    /// Mark whose turn it is. After a win this still reports the winner,
    /// since the turn is never flipped on a deciding move.
    pub fn active_mark(&self) -> Mark {
        self.active
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Number of cells holding a mark.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Place `mark` at `index` and advance the game.
    ///
    /// Turn ownership is the validator's concern; the board only guards its
    /// own invariants (bounds, empty cell, not terminal).
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<Outcome, BoardError> {
        if self.is_terminal() {
            return Err(BoardError::Terminal);
        }
        let slot = self.cells.get_mut(index).ok_or(BoardError::OutOfRange)?;
        if slot.is_some() {
            return Err(BoardError::Occupied);
        }
        *slot = Some(mark);

        if completes_line(&self.cells, mark) {
            self.outcome = Outcome::Win(mark);
        } else if self.is_full() {
            self.outcome = Outcome::Draw;
        } else {
            self.active = mark.other();
        }
        Ok(self.outcome)
    }

    /// Wipe the board back to its freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// True if `mark` occupies every cell of at least one winning line.
pub fn completes_line(cells: &Cells, mark: Mark) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == Some(mark)))
}

/// The mark holding a complete line, if any.
pub fn winner(cells: &Cells) -> Option<Mark> {
    [Mark::A, Mark::B]
        .into_iter()
        .find(|&m| completes_line(cells, m))
}
