use tictactoe_server::{
    apply_move, validate_move, validate_reset, Board, ConnectionId, Mark, Outcome, Rejection,
    ResetPolicy, Role, RoleRegistry,
};

const A: ConnectionId = ConnectionId(0);
const B: ConnectionId = ConnectionId(1);
const S: ConnectionId = ConnectionId(2);

fn full_registry() -> RoleRegistry {
    let mut registry = RoleRegistry::new();
    registry.assign(A);
    registry.assign(B);
    registry.assign(S);
    registry
}

#[test]
fn legal_move_is_accepted() {
    let board = Board::new();
    assert_eq!(validate_move(&board, &full_registry(), A, 4), Ok(4));
}

#[test]
fn spectators_cannot_move() {
    let board = Board::new();
    assert_eq!(
        validate_move(&board, &full_registry(), S, 0),
        Err(Rejection::NotAPlayer)
    );
}

#[test]
fn out_of_turn_move_is_rejected() {
    let board = Board::new();
    assert_eq!(
        validate_move(&board, &full_registry(), B, 0),
        Err(Rejection::NotYourTurn)
    );
}

#[test]
fn lone_player_must_wait() {
    let mut registry = RoleRegistry::new();
    registry.assign(A);
    let board = Board::new();
    assert_eq!(
        validate_move(&board, &registry, A, 0),
        Err(Rejection::WaitingForPlayers)
    );
}

#[test]
fn bad_indices_are_rejected() {
    let registry = full_registry();
    let mut board = Board::new();
    assert_eq!(validate_move(&board, &registry, A, -1), Err(Rejection::OutOfRange));
    assert_eq!(validate_move(&board, &registry, A, 9), Err(Rejection::OutOfRange));
    board.place(3, Mark::A).unwrap();
    board.place(4, Mark::B).unwrap();
    assert_eq!(validate_move(&board, &registry, A, 3), Err(Rejection::Occupied));
}

#[test]
fn terminal_check_comes_first() {
    let registry = full_registry();
    let mut board = Board::new();
    for (i, mark) in [(0, Mark::A), (3, Mark::B), (1, Mark::A), (4, Mark::B), (2, Mark::A)] {
        board.place(i, mark).unwrap();
    }
    // Even a spectator with a bogus index hears "terminal" first.
    assert_eq!(validate_move(&board, &registry, S, 99), Err(Rejection::Terminal));
}

#[test]
fn unknown_sender_is_rejected() {
    let board = Board::new();
    assert_eq!(
        validate_move(&board, &full_registry(), ConnectionId(99), 0),
        Err(Rejection::UnknownConnection)
    );
}

#[test]
fn apply_move_places_the_active_mark() {
    let registry = full_registry();
    let mut board = Board::new();
    assert_eq!(apply_move(&mut board, &registry, A, 0), Ok(Outcome::None));
    assert_eq!(board.cell(0), Some(Some(Mark::A)));
    let before = board;
    assert_eq!(apply_move(&mut board, &registry, A, 1), Err(Rejection::NotYourTurn));
    assert_eq!(board, before);
}

#[test]
fn reset_policy() {
    let registry = full_registry();
    assert_eq!(validate_reset(&registry, S, ResetPolicy::Anyone), Ok(Role::Spectator));
    assert_eq!(
        validate_reset(&registry, S, ResetPolicy::PlayersOnly),
        Err(Rejection::ResetNotAllowed)
    );
    assert_eq!(validate_reset(&registry, B, ResetPolicy::PlayersOnly), Ok(Role::PlayerB));
}
