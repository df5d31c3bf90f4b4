use tictactoe_server::{derive_status, status_text, Mark, Outcome, Seats, Status, WAITING_TEXT};

const BOTH: Seats = Seats { a: true, b: true };

#[test]
fn waiting_beats_everything() {
    for seats in [Seats { a: true, b: false }, Seats { a: false, b: true }, Seats::default()] {
        assert_eq!(derive_status(seats, Outcome::Win(Mark::A), Mark::A), Status::Waiting);
        assert_eq!(status_text(seats, Outcome::Draw, Mark::B), WAITING_TEXT);
    }
}

#[test]
fn status_lines() {
    assert_eq!(status_text(BOTH, Outcome::Win(Mark::B), Mark::B), "Player B Wins!");
    assert_eq!(status_text(BOTH, Outcome::Draw, Mark::A), "It's a Draw!");
    assert_eq!(status_text(BOTH, Outcome::None, Mark::A), "Player A's Turn");
    assert_eq!(
        status_text(Seats::default(), Outcome::None, Mark::A),
        "Waiting for two players to connect\u{2026}"
    );
}

#[test]
fn winner_comes_from_the_outcome() {
    // The active mark is irrelevant once the game is won.
    assert_eq!(status_text(BOTH, Outcome::Win(Mark::A), Mark::B), "Player A Wins!");
}
