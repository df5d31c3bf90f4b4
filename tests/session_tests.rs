use tictactoe_server::{
    ClientMessage, ConnectionId, Dispatch, Mark, Rejection, ResetPolicy, Role, ServerMessage,
    Session, StateSnapshot, WAITING_TEXT,
};

fn state_of(dispatch: &Dispatch) -> &StateSnapshot {
    match dispatch {
        Dispatch::Broadcast(ServerMessage::State(s)) => s,
        other => panic!("expected state broadcast, got {:?}", other),
    }
}

fn play(session: &mut Session, id: ConnectionId, index: i64) -> Result<Dispatch, Rejection> {
    session.handle(id, ClientMessage::Move { index })
}

fn two_players(policy: ResetPolicy) -> (Session, ConnectionId, ConnectionId) {
    let mut session = Session::new(policy);
    let (a, _, _) = session.connect();
    let (b, _, _) = session.connect();
    (session, a, b)
}

#[test]
fn connect_unicasts_role_then_broadcasts_state() {
    let mut session = Session::default();
    let (id, role, dispatches) = session.connect();
    assert_eq!(role, Role::PlayerA);
    assert_eq!(
        dispatches[0],
        Dispatch::Unicast(id, ServerMessage::Assign { symbol: Role::PlayerA })
    );
    assert_eq!(state_of(&dispatches[1]).status_text, WAITING_TEXT);
    assert_eq!(dispatches.len(), 2);
}

#[test]
fn roles_a_b_s_s() {
    let mut session = Session::default();
    let roles: Vec<Role> = (0..4).map(|_| session.connect().1).collect();
    assert_eq!(
        roles,
        vec![Role::PlayerA, Role::PlayerB, Role::Spectator, Role::Spectator]
    );
}

#[test]
fn end_to_end_game() {
    let (mut session, a, b) = two_players(ResetPolicy::Anyone);

    let s = play(&mut session, a, 0).unwrap();
    let s = state_of(&s);
    assert_eq!(s.board_state[0], Some(Mark::A));
    assert_eq!(s.current_player, Mark::B);
    assert_eq!(s.status_text, "Player B's Turn");

    assert_eq!(play(&mut session, b, 0), Err(Rejection::Occupied));

    let s = play(&mut session, b, 4).unwrap();
    let s = state_of(&s);
    assert_eq!(
        s.board_state,
        [Some(Mark::A), None, None, None, Some(Mark::B), None, None, None, None]
    );
    assert_eq!(s.current_player, Mark::A);

    play(&mut session, a, 1).unwrap();
    play(&mut session, b, 5).unwrap();
    let s = play(&mut session, a, 2).unwrap();
    let s = state_of(&s);
    assert!(s.game_over);
    assert_eq!(s.status_text, "Player A Wins!");
    assert_eq!(s.current_player, Mark::A);

    assert_eq!(play(&mut session, b, 8), Err(Rejection::Terminal));
}

#[test]
fn waiting_player_cannot_move() {
    let mut session = Session::default();
    let (a, _, _) = session.connect();
    let before = session.snapshot();
    assert_eq!(play(&mut session, a, 0), Err(Rejection::WaitingForPlayers));
    assert_eq!(session.snapshot(), before);
    assert_eq!(before.status_text, WAITING_TEXT);
}

#[test]
fn out_of_turn_move_changes_nothing() {
    let (mut session, a, b) = two_players(ResetPolicy::Anyone);
    play(&mut session, a, 0).unwrap();
    let before = *session.board();
    assert_eq!(play(&mut session, a, 1), Err(Rejection::NotYourTurn));
    assert_eq!(*session.board(), before);
    assert!(play(&mut session, b, 1).is_ok());
}

#[test]
fn player_disconnect_forces_reset() {
    let (mut session, a, b) = two_players(ResetPolicy::Anyone);
    play(&mut session, a, 0).unwrap();
    play(&mut session, b, 4).unwrap();

    let dispatch = session.disconnect(a).unwrap();
    let s = state_of(&dispatch);
    assert_eq!(s.board_state, [None; 9]);
    assert_eq!(s.current_player, Mark::A);
    assert!(!s.game_over);
    assert_eq!(s.status_text, WAITING_TEXT);

    // Second disconnect of the same id is a no-op.
    assert_eq!(session.disconnect(a), None);
}

#[test]
fn spectator_disconnect_keeps_the_board() {
    let (mut session, a, _b) = two_players(ResetPolicy::Anyone);
    let (s, _, _) = session.connect();
    play(&mut session, a, 0).unwrap();
    let dispatch = session.disconnect(s).unwrap();
    assert_eq!(state_of(&dispatch).board_state[0], Some(Mark::A));
}

#[test]
fn rejoining_player_takes_the_free_seat() {
    let (mut session, a, _b) = two_players(ResetPolicy::Anyone);
    let (spectator, role, _) = session.connect();
    assert_eq!(role, Role::Spectator);
    session.disconnect(a);
    assert_eq!(session.registry().role_of(spectator), Some(Role::Spectator));
    let (_, role, _) = session.connect();
    assert_eq!(role, Role::PlayerA);
}

#[test]
fn reset_twice_matches_reset_once() {
    let (mut session, a, b) = two_players(ResetPolicy::Anyone);
    play(&mut session, a, 0).unwrap();
    let once = session.handle(b, ClientMessage::Reset).unwrap();
    let twice = session.handle(a, ClientMessage::Reset).unwrap();
    assert_eq!(once, twice);
    assert_eq!(state_of(&once).board_state, [None; 9]);
}

#[test]
fn reset_policy_governs_spectators() {
    let (mut open, a, _) = two_players(ResetPolicy::Anyone);
    let (watcher, _, _) = open.connect();
    play(&mut open, a, 0).unwrap();
    assert!(open.handle(watcher, ClientMessage::Reset).is_ok());
    assert_eq!(open.board().occupied(), 0);

    let (mut strict, a, b) = two_players(ResetPolicy::PlayersOnly);
    let (watcher, _, _) = strict.connect();
    play(&mut strict, a, 0).unwrap();
    assert_eq!(
        strict.handle(watcher, ClientMessage::Reset),
        Err(Rejection::ResetNotAllowed)
    );
    assert_eq!(strict.board().occupied(), 1);
    assert!(strict.handle(b, ClientMessage::Reset).is_ok());
}

#[test]
fn reset_after_a_win_starts_over() {
    let (mut session, a, b) = two_players(ResetPolicy::Anyone);
    for (id, index) in [(a, 0), (b, 3), (a, 1), (b, 4), (a, 2)] {
        play(&mut session, id, index).unwrap();
    }
    assert!(session.board().is_terminal());
    let s = session.handle(b, ClientMessage::Reset).unwrap();
    assert_eq!(state_of(&s).status_text, "Player A's Turn");
}
