//! Gatekeeper for client intents.
//!
//! Checks run fail-fast in a fixed order; the first failing check names the
//! [`Rejection`]. A rejected intent leaves the board untouched.

use crate::{
    board::Board,
    common::{Outcome, Rejection},
    config::{ResetPolicy, BOARD_CELLS},
    role::{ConnectionId, Role, RoleRegistry},
};

/// Decide whether `sender` may place its mark at `index`, returning the
/// cell index on success.
pub fn validate_move(
    board: &Board,
    registry: &RoleRegistry,
    sender: ConnectionId,
    index: i64,
) -> Result<usize, Rejection> {
    if board.is_terminal() {
        return Err(Rejection::Terminal);
    }
    let role = registry
        .role_of(sender)
        .ok_or(Rejection::UnknownConnection)?;
    let mark = role.mark().ok_or(Rejection::NotAPlayer)?;
    if mark != board.active_mark() {
        return Err(Rejection::NotYourTurn);
    }
    if !registry.seats().both() {
        return Err(Rejection::WaitingForPlayers);
    }
    let index = usize::try_from(index)
        .ok()
        .filter(|&i| i < BOARD_CELLS)
        .ok_or(Rejection::OutOfRange)?;
    match board.cell(index) {
        Some(None) => Ok(index),
        Some(Some(_)) => Err(Rejection::Occupied),
        None => Err(Rejection::OutOfRange),
    }
}

/// Validate and, on success, apply a move. Returns the outcome after the
/// placement.
pub fn apply_move(
    board: &mut Board,
    registry: &RoleRegistry,
    sender: ConnectionId,
    index: i64,
) -> Result<Outcome, Rejection> {
    let cell = validate_move(board, registry, sender, index)?;
    let mark = board.active_mark();
    board.place(cell, mark).map_err(Rejection::from)
}

/// Decide whether `sender` may reset the board under `policy`. Resets are
/// allowed whatever the board's state.
pub fn validate_reset(
    registry: &RoleRegistry,
    sender: ConnectionId,
    policy: ResetPolicy,
) -> Result<Role, Rejection> {
    let role = registry
        .role_of(sender)
        .ok_or(Rejection::UnknownConnection)?;
    match policy {
        ResetPolicy::Anyone => Ok(role),
        ResetPolicy::PlayersOnly if role.is_player() => Ok(role),
        ResetPolicy::PlayersOnly => Err(Rejection::ResetNotAllowed),
    }
}
