//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON over WebSocket, one message per text
//! frame, discriminated by the `action` field.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbols for the six game pieces, indexed by [`User::piece`].
pub const PIECES: [&str; 6] = ["♙", "♖", "♘", "♗", "♔", "♕"];

/// Symbol for a piece index, or `?` when the index is out of range.
pub fn piece_symbol(piece: usize) -> &'static str {
    PIECES.get(piece).copied().unwrap_or("?")
}

/// A player known to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub piece: usize,
}

/// A question as sent to the player. The correct answer stays on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<i64>,
}

/// Whether a round is running or the game sits between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Round,
    Paused,
}

/// Scoreboard broadcast by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Score per user id.
    pub scores: HashMap<String, i64>,
    pub status: GameStatus,
    /// Board spaces each user moves after a round. Only present while paused;
    /// the server sends `null` otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_spaces: Option<HashMap<String, i64>>,
}

impl GameState {
    /// Score for a user, if the server tracks one.
    pub fn score_of(&self, user_id: &str) -> Option<i64> {
        self.scores.get(user_id).copied()
    }

    /// Spaces a user moves after the last round, if known.
    pub fn move_spaces_of(&self, user_id: &str) -> Option<i64> {
        self.move_spaces.as_ref()?.get(user_id).copied()
    }
}

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum OutboundMessage {
    /// Join the game with a display name and a piece.
    Join { name: String, piece: usize },

    /// Ask for the current player list.
    Clients,

    /// Answer the current question with the index of the chosen option.
    Answer { answer: usize },
}

impl OutboundMessage {
    /// Wire tag of this message.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Clients => "clients",
            Self::Answer { .. } => "answer",
        }
    }

    /// Encode as a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Everyone who has joined so far.
    Clients { clients: Vec<User> },

    /// Updated scores and game status. The first one starts the game.
    State { state: GameState },

    /// The game was stopped.
    Stop,

    /// A new question for this player.
    Question { question: Question },

    /// The server accepted our join; this is us.
    Identity { client: User },

    /// Verdict on our last answer plus the next question.
    Answer { correct: bool, question: Question },

    /// Seconds left in the current round.
    Timer { time: u32 },

    /// The server rejected an action.
    Error { message: String },
}

impl InboundMessage {
    /// Tag used to route this message to subscribers.
    pub fn tag(&self) -> InboundTag {
        match self {
            Self::Clients { .. } => InboundTag::Clients,
            Self::State { .. } => InboundTag::State,
            Self::Stop => InboundTag::Stop,
            Self::Question { .. } => InboundTag::Question,
            Self::Identity { .. } => InboundTag::Identity,
            Self::Answer { .. } => InboundTag::Answer,
            Self::Timer { .. } => InboundTag::Timer,
            Self::Error { .. } => InboundTag::Error,
        }
    }

    /// Decode a JSON text frame.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(text).map_err(DecodeError)
    }
}

/// The closed set of inbound tags handlers can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InboundTag {
    Clients,
    State,
    Stop,
    Question,
    Identity,
    Answer,
    Timer,
    Error,
}

impl InboundTag {
    pub const ALL: [InboundTag; 8] = [
        InboundTag::Clients,
        InboundTag::State,
        InboundTag::Stop,
        InboundTag::Question,
        InboundTag::Identity,
        InboundTag::Answer,
        InboundTag::Timer,
        InboundTag::Error,
    ];

    /// The `action` value carried on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            InboundTag::Clients => "clients",
            InboundTag::State => "state",
            InboundTag::Stop => "stop",
            InboundTag::Question => "question",
            InboundTag::Identity => "identity",
            InboundTag::Answer => "answer",
            InboundTag::Timer => "timer",
            InboundTag::Error => "error",
        }
    }
}

impl fmt::Display for InboundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame that is not valid JSON or does not match any inbound shape.
#[derive(Debug, thiserror::Error)]
#[error("malformed frame: {0}")]
pub struct DecodeError(#[source] serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            question: "3 * 4".to_string(),
            options: vec![12, 14, 9, -2],
        }
    }

    fn sample_user() -> User {
        User {
            id: "8c1f".to_string(),
            name: "Ann".to_string(),
            piece: 2,
        }
    }

    #[test]
    fn test_outbound_wire_format() {
        let json = OutboundMessage::Join {
            name: "Ann".to_string(),
            piece: 2,
        }
        .to_json()
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"action": "join", "name": "Ann", "piece": 2})
        );

        let json = OutboundMessage::Clients.to_json().unwrap();
        assert_eq!(json, r#"{"action":"clients"}"#);

        let json = OutboundMessage::Answer { answer: 3 }.to_json().unwrap();
        assert_eq!(json, r#"{"action":"answer","answer":3}"#);
    }

    #[test]
    fn test_outbound_action_matches_wire_tag() {
        let messages = [
            OutboundMessage::Join {
                name: "Bo".to_string(),
                piece: 0,
            },
            OutboundMessage::Clients,
            OutboundMessage::Answer { answer: 1 },
        ];
        for msg in messages {
            let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
            assert_eq!(value["action"], msg.action());
        }
    }

    #[test]
    fn test_outbound_survives_server_decode() {
        let messages = [
            OutboundMessage::Join {
                name: "Ann".to_string(),
                piece: 5,
            },
            OutboundMessage::Clients,
            OutboundMessage::Answer { answer: 0 },
        ];
        for msg in messages {
            let decoded: OutboundMessage = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn test_inbound_survives_encode() {
        let mut scores = HashMap::new();
        scores.insert("8c1f".to_string(), 17);
        let mut moves = HashMap::new();
        moves.insert("8c1f".to_string(), 3);

        let messages = vec![
            InboundMessage::Clients {
                clients: vec![sample_user()],
            },
            InboundMessage::State {
                state: GameState {
                    scores: scores.clone(),
                    status: GameStatus::Round,
                    move_spaces: None,
                },
            },
            InboundMessage::State {
                state: GameState {
                    scores,
                    status: GameStatus::Paused,
                    move_spaces: Some(moves),
                },
            },
            InboundMessage::Stop,
            InboundMessage::Question {
                question: sample_question(),
            },
            InboundMessage::Identity {
                client: sample_user(),
            },
            InboundMessage::Answer {
                correct: false,
                question: sample_question(),
            },
            InboundMessage::Timer { time: 30 },
            InboundMessage::Error {
                message: "Game is already running".to_string(),
            },
        ];

        for msg in messages {
            let json = serde_json::to_string(&msg).unwrap();
            let decoded = InboundMessage::from_json(&json).unwrap();
            assert_eq!(decoded.tag(), msg.tag());
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn test_decode_state_from_server() {
        let msg = InboundMessage::from_json(
            r#"{"action":"state","state":{"scores":{"u1":3},"status":"round","move_spaces":null}}"#,
        )
        .unwrap();
        let InboundMessage::State { state } = msg else {
            panic!("expected state message");
        };
        assert_eq!(state.status, GameStatus::Round);
        assert_eq!(state.score_of("u1"), Some(3));
        assert_eq!(state.move_spaces, None);
        assert_eq!(state.move_spaces_of("u1"), None);
    }

    #[test]
    fn test_decode_paused_state_with_moves() {
        let msg = InboundMessage::from_json(
            r#"{"action":"state","state":{"scores":{"u1":12},"status":"paused","move_spaces":{"u1":2}}}"#,
        )
        .unwrap();
        let InboundMessage::State { state } = msg else {
            panic!("expected state message");
        };
        assert_eq!(state.status, GameStatus::Paused);
        assert_eq!(state.move_spaces_of("u1"), Some(2));
        assert_eq!(state.move_spaces_of("u2"), None);
    }

    #[test]
    fn test_decode_stop_without_payload() {
        let msg = InboundMessage::from_json(r#"{"action":"stop"}"#).unwrap();
        assert_eq!(msg, InboundMessage::Stop);
        assert_eq!(msg.tag(), InboundTag::Stop);
    }

    #[test]
    fn test_decode_rejects_malformed_frames() {
        assert!(InboundMessage::from_json("not json").is_err());
        assert!(InboundMessage::from_json(r#"{"action":"dance"}"#).is_err());
        assert!(InboundMessage::from_json(r#"{"action":"timer"}"#).is_err());
        assert!(InboundMessage::from_json(r#"{"time":3}"#).is_err());
    }

    #[test]
    fn test_tag_strings_match_wire() {
        for tag in InboundTag::ALL {
            assert_eq!(tag.to_string(), tag.as_str());
        }
        let msg = InboundMessage::Timer { time: 1 };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["action"], msg.tag().as_str());
    }

    #[test]
    fn test_piece_symbol() {
        assert_eq!(piece_symbol(0), "♙");
        assert_eq!(piece_symbol(5), "♕");
        assert_eq!(piece_symbol(6), "?");
    }
}
