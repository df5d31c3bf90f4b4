use serde_json::{json, Value};
use tictactoe_server::protocol::{decode, encode};
use tictactoe_server::{
    Board, ClientMessage, Mark, Role, Seats, ServerMessage, StateSnapshot, WAITING_TEXT,
};

#[test]
fn client_messages_decode() {
    assert_eq!(
        decode::<ClientMessage>(br#"{"type":"move","index":4}"#).unwrap(),
        ClientMessage::Move { index: 4 }
    );
    assert_eq!(
        decode::<ClientMessage>(br#"{"type":"reset"}"#).unwrap(),
        ClientMessage::Reset
    );
    // Range is the validator's business, not the decoder's.
    assert_eq!(
        decode::<ClientMessage>(br#"{"type":"move","index":-3}"#).unwrap(),
        ClientMessage::Move { index: -3 }
    );
}

#[test]
fn move_index_accepts_numeric_text_and_whole_floats() {
    let frames: [&[u8]; 3] = [
        br#"{"type":"move","index":"4"}"#,
        br#"{"type":"move","index":4.0}"#,
        br#"{"type":"move","index":" 4 "}"#,
    ];
    for frame in frames {
        assert_eq!(
            decode::<ClientMessage>(frame).unwrap(),
            ClientMessage::Move { index: 4 },
            "{:?}",
            frame
        );
    }
    // Still left to the validator to refuse.
    assert_eq!(
        decode::<ClientMessage>(br#"{"type":"move","index":"12"}"#).unwrap(),
        ClientMessage::Move { index: 12 }
    );
}

#[test]
fn malformed_client_messages_fail_to_decode() {
    let frames: [&[u8]; 9] = [
        b"not json",
        br#"{"index":1}"#,
        br#"{"type":"jump","index":1}"#,
        br#"{"type":"move"}"#,
        br#"{"type":"move","index":1.5}"#,
        br#"{"type":"move","index":"1.5"}"#,
        br#"{"type":"move","index":"one"}"#,
        br#"{"type":"move","index":null}"#,
        br#"{"type":"move","index":[4]}"#,
    ];
    for frame in frames {
        assert!(decode::<ClientMessage>(frame).is_err(), "{:?}", frame);
    }
}

#[test]
fn assign_wire_shape() {
    let bytes = encode(&ServerMessage::Assign { symbol: Role::Spectator }).unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v, json!({"type": "assign", "symbol": "S"}));
}

#[test]
fn state_wire_shape() {
    let mut board = Board::new();
    board.place(0, Mark::A).unwrap();
    let snapshot = StateSnapshot::capture(&board, Seats { a: true, b: false });
    let bytes = encode(&ServerMessage::State(snapshot)).unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        v,
        json!({
            "type": "state",
            "boardState": ["A", null, null, null, null, null, null, null, null],
            "currentPlayer": "B",
            "gameOver": false,
            "statusText": WAITING_TEXT,
        })
    );
}

#[test]
fn server_messages_decode_for_clients() {
    let msg: ServerMessage = decode(br#"{"type":"assign","symbol":"B"}"#).unwrap();
    assert_eq!(msg, ServerMessage::Assign { symbol: Role::PlayerB });
}
