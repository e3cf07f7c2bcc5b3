// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};

use crate::{BoardSnapshot, Color};

/// Prompt sent to the player whose turn it is.
pub const YOUR_TURN: &str = "That is your turn. Please enter a strike (format ex: a2-a3)...";
/// Reply to a strike that does not parse or is not legal.
pub const INVALID_MOVE: &str = "Invalid move";
/// Start of the prompt asking which piece a pawn becomes.
pub const PROMOTION_PROMPT: &str = "Promotion: choose a piece to replace your pawn on";

/// Tells a player which colour it plays.
pub fn designation(color: Color) -> String {
    format!("You have been designated to be the {color} color")
}

/// Sent by the server to a client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Text(String),
    Board(BoardSnapshot),
    /// Liveness probe. Clients ignore it.
    Heartbeat,
}

/// Sent by a client to the server.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// A strike (`e2-e4`, `0-0`) or the answer to a promotion prompt.
    Move(String),
    DisplayBoard,
}

impl ClientMessage {
    /// Decodes one line from a client. A line that is not a JSON message is
    /// taken as typed text and treated as a strike.
    pub fn decode(line: &str) -> Self {
        serde_json::from_str(line).unwrap_or_else(|_| ClientMessage::Move(line.to_string()))
    }
}

impl From<String> for ServerMessage {
    fn from(value: String) -> Self {
        ServerMessage::Text(value)
    }
}

impl From<&str> for ServerMessage {
    fn from(value: &str) -> Self {
        ServerMessage::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_wire_format() {
        let text = serde_json::to_string(&ServerMessage::from("Invalid move")).unwrap();
        assert_eq!(text, r#"{"Text":"Invalid move"}"#);
        let text = serde_json::to_string(&ServerMessage::Heartbeat).unwrap();
        assert_eq!(text, r#""Heartbeat""#);
        let message: ClientMessage = serde_json::from_str(r#"{"Move":"e2-e4"}"#).unwrap();
        assert_eq!(message, ClientMessage::Move("e2-e4".to_string()));
        let message: ClientMessage = serde_json::from_str(r#""DisplayBoard""#).unwrap();
        assert_eq!(message, ClientMessage::DisplayBoard);
    }
    #[test]
    fn test_decode_falls_back_to_text() {
        assert_eq!(ClientMessage::decode(r#""DisplayBoard""#), ClientMessage::DisplayBoard);
        assert_eq!(
            ClientMessage::decode(r#"{"Move":"0-0"}"#),
            ClientMessage::Move("0-0".to_string())
        );
        assert_eq!(ClientMessage::decode("e2-e4"), ClientMessage::Move("e2-e4".to_string()));
        assert_eq!(
            ClientMessage::decode(r#"{"Move":"#),
            ClientMessage::Move(r#"{"Move":"#.to_string())
        );
    }
    #[test]
    fn test_board_message() {
        let message = ServerMessage::Board(Board::new().snapshot());
        let text = serde_json::to_string(&message).unwrap();
        let back: ServerMessage = serde_json::from_str(&text).unwrap();
        assert_eq!(back, message);
    }
}
