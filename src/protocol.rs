//! Text-frame codec for the game server protocol.
//!
//! Inbound frames carry one JSON [`GameState`] each. Outbound moves are a
//! tag, a delimiter and a JSON [`MakeTurn`]:
//!
//! ```text
//! make_turn#{"x":1,"y":2}
//! ```

use derive_more::{Display, Error};
use tracing::instrument;

use crate::games::tictactoe::{GameState, MakeTurn};

/// Tag prefixed to every outbound move frame.
pub const MAKE_TURN_TAG: &str = "make_turn";

/// Separates the tag from the JSON payload.
pub const TAG_DELIMITER: char = '#';

/// Decodes one inbound text frame into a snapshot.
#[instrument(skip(text), fields(len = text.len()))]
pub fn decode_state(text: &str) -> Result<GameState, ProtocolError> {
    serde_json::from_str(text).map_err(|e| ProtocolError::new(format!("Invalid state frame: {}", e)))
}

/// Encodes a move request as one outbound text frame.
#[instrument]
pub fn encode_turn(turn: &MakeTurn) -> Result<String, ProtocolError> {
    let payload = serde_json::to_string(turn)
        .map_err(|e| ProtocolError::new(format!("Failed to encode move: {}", e)))?;
    Ok(format!("{}{}{}", MAKE_TURN_TAG, TAG_DELIMITER, payload))
}

/// Decodes an outbound move frame. Servers and test peers use this side.
#[instrument(skip(text))]
pub fn decode_turn(text: &str) -> Result<MakeTurn, ProtocolError> {
    let (tag, payload) = text
        .split_once(TAG_DELIMITER)
        .ok_or_else(|| ProtocolError::new("Missing tag delimiter"))?;
    if tag != MAKE_TURN_TAG {
        return Err(ProtocolError::new(format!("Unknown frame tag: {}", tag)));
    }
    serde_json::from_str(payload).map_err(|e| ProtocolError::new(format!("Invalid move payload: {}", e)))
}

/// Frame encoding or decoding error.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", message, file, line)]
pub struct ProtocolError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
