#![cfg(feature = "std")]

//! Wire messages. Every frame carries one JSON object tagged by `type`.

use serde::{
    de::{DeserializeOwned, Error as _},
    Deserialize, Deserializer, Serialize,
};

use crate::{
    board::{Board, Cells},
    common::Mark,
    role::{Role, Seats},
    status::status_text,
};

/// Intents sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Place the sender's mark. Range is checked by the validator.
    Move {
        #[serde(deserialize_with = "index_number")]
        index: i64,
    },
    /// Wipe the board for everyone.
    Reset,
}

/// Browsers may send the index as `4`, `4.0` or `"4"`. Anything that is
/// not a whole number after that coercion fails to decode.
fn index_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Integer(n) => return Ok(n),
        Raw::Float(x) => x,
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("index {:?} is not a number", text)))?,
    };
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(D::Error::custom(format!("index {} is not an integer", value)))
    }
}

/// Messages pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Sent once to a new connection, right after its role is chosen.
    Assign { symbol: Role },
    /// Full board snapshot, broadcast after every accepted mutation.
    State(StateSnapshot),
}

/// Immutable copy of the shared state plus its derived status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub board_state: Cells,
    pub current_player: Mark,
    pub game_over: bool,
    pub status_text: String,
}

impl StateSnapshot {
    pub fn capture(board: &Board, seats: Seats) -> Self {
        Self {
            board_state: *board.cells(),
            current_player: board.active_mark(),
            game_over: board.is_terminal(),
            status_text: status_text(seats, board.outcome(), board.active_mark()),
        }
    }
}

/// A frame that could not be parsed into a message. Dropped by the server
/// without affecting the connection.
#[derive(Debug)]
pub struct DecodeError(serde_json::Error);

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed message: {}", self.0)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

pub fn encode<M: Serialize>(msg: &M) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec(msg).map_err(|e| anyhow::anyhow!("Serialization error: {}", e))
}

pub fn decode<M: DeserializeOwned>(frame: &[u8]) -> Result<M, DecodeError> {
    serde_json::from_slice(frame).map_err(DecodeError)
}
