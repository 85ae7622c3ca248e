//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::domain::{LobbyStatus, WorldSize};

/// Messages sent by clients, dispatched on their `type` field.
///
/// Unknown types deserialize to [`ClientMessage::Unknown`] so newer clients
/// never trip over an older server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Identity fields are taken loosely typed; see [`field_text`]
    Hello {
        #[serde(default)]
        username: Option<Value>,
        #[serde(default)]
        wallet: Option<Value>,
    },
    Ping,
    ReqLobby,
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    /// Parse a text frame. `None` for malformed payloads.
    pub fn parse(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(message) => Some(message),
            Err(e) => {
                tracing::debug!("Dropping malformed client message: {}", e);
                None
            }
        }
    }
}

/// Text form of a loosely typed handshake field.
///
/// Strings pass through. Missing fields, `null`, `false`, `0` and `""` become
/// empty. `true` and other numbers use their textual form. Arrays and
/// objects carry no usable text and become empty.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(number)) => number_text(number),
        _ => String::new(),
    }
}

fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return if int == 0 { String::new() } else { int.to_string() };
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    match number.as_f64() {
        Some(float) if float == 0.0 || float.is_nan() => String::new(),
        // integral floats print without a fractional part
        Some(float) if float.fract() == 0.0 && float.abs() < 1e15 => (float as i64).to_string(),
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

/// Type tag of server-originated messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Welcome,
    Pong,
    LobbyUpdate,
    MatchStart,
}

/// Sent once to a freshly connected session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    pub r#type: MessageType,
    pub player_id: String,
    pub server_time: i64,
    pub tick_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongMessage {
    pub r#type: MessageType,
    pub t: i64,
}

/// Roster row as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub u: String,
    pub w: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyUpdateMessage {
    pub r#type: MessageType,
    pub status: LobbyStatus,
    pub players: Vec<PlayerInfo>,
    /// Present only while counting down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countdown_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDto {
    pub w: u32,
    pub h: u32,
}

impl From<WorldSize> for WorldDto {
    fn from(world: WorldSize) -> Self {
        Self {
            w: world.w,
            h: world.h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStartMessage {
    pub r#type: MessageType,
    pub seed: u64,
    pub world: WorldDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_hello_with_fields() {
        // given:
        let text = r#"{"type":"hello","username":"alice","wallet":"0xabc"}"#;

        // when:
        let message = ClientMessage::parse(text);

        // then:
        assert_eq!(
            message,
            Some(ClientMessage::Hello {
                username: Some(json!("alice")),
                wallet: Some(json!("0xabc")),
            })
        );
    }

    #[test]
    fn test_parse_hello_with_non_string_fields() {
        // given:
        let text = r#"{"type":"hello","username":42,"wallet":false}"#;

        // when:
        let message = ClientMessage::parse(text);

        // then: still a hello, fields kept for coercion
        assert_eq!(
            message,
            Some(ClientMessage::Hello {
                username: Some(json!(42)),
                wallet: Some(json!(false)),
            })
        );
    }

    #[test]
    fn test_field_text_coercion() {
        assert_eq!(field_text(Some(&json!("alice"))), "alice");
        assert_eq!(field_text(Some(&json!(42))), "42");
        assert_eq!(field_text(Some(&json!(-7))), "-7");
        assert_eq!(field_text(Some(&json!(1.5))), "1.5");
        assert_eq!(field_text(Some(&json!(3.0))), "3");
        assert_eq!(field_text(Some(&json!(true))), "true");
        assert_eq!(field_text(Some(&json!(12345678901234567890u64))), "12345678901234567890");
    }

    #[test]
    fn test_field_text_falsy_values_are_empty() {
        assert_eq!(field_text(None), "");
        assert_eq!(field_text(Some(&json!(null))), "");
        assert_eq!(field_text(Some(&json!(false))), "");
        assert_eq!(field_text(Some(&json!(0))), "");
        assert_eq!(field_text(Some(&json!(0.0))), "");
        assert_eq!(field_text(Some(&json!(""))), "");
        assert_eq!(field_text(Some(&json!({"a": 1}))), "");
        assert_eq!(field_text(Some(&json!(["x"]))), "");
    }

    #[test]
    fn test_parse_hello_without_fields() {
        assert_eq!(
            ClientMessage::parse(r#"{"type":"hello"}"#),
            Some(ClientMessage::Hello {
                username: None,
                wallet: None,
            })
        );
        assert_eq!(
            ClientMessage::parse(r#"{"type":"hello","username":null}"#),
            Some(ClientMessage::Hello {
                username: None,
                wallet: None,
            })
        );
    }

    #[test]
    fn test_parse_ping_and_req_lobby() {
        assert_eq!(ClientMessage::parse(r#"{"type":"ping"}"#), Some(ClientMessage::Ping));
        assert_eq!(
            ClientMessage::parse(r#"{"type":"req_lobby"}"#),
            Some(ClientMessage::ReqLobby)
        );
    }

    #[test]
    fn test_parse_ping_with_extra_fields() {
        assert_eq!(
            ClientMessage::parse(r#"{"type":"ping","nonce":42}"#),
            Some(ClientMessage::Ping)
        );
    }

    #[test]
    fn test_parse_unknown_type_is_not_an_error() {
        // given:
        let text = r#"{"type":"input","dx":1,"dy":0}"#;

        // when:
        let message = ClientMessage::parse(text);

        // then:
        assert_eq!(message, Some(ClientMessage::Unknown));
    }

    #[test]
    fn test_parse_malformed_payload_is_dropped() {
        assert_eq!(ClientMessage::parse("not json"), None);
        assert_eq!(ClientMessage::parse(r#"{"username":"alice"}"#), None);
        assert_eq!(ClientMessage::parse(""), None);
    }

    #[test]
    fn test_welcome_serialization() {
        // given:
        let message = WelcomeMessage {
            r#type: MessageType::Welcome,
            player_id: "abc".to_string(),
            server_time: 1000,
            tick_rate: 30,
        };

        // when:
        let value = serde_json::to_value(&message).unwrap();

        // then:
        assert_eq!(
            value,
            json!({"type": "welcome", "playerId": "abc", "serverTime": 1000, "tickRate": 30})
        );
    }

    #[test]
    fn test_lobby_update_omits_countdown_when_absent() {
        // given:
        let message = LobbyUpdateMessage {
            r#type: MessageType::LobbyUpdate,
            status: LobbyStatus::Waiting,
            players: vec![PlayerInfo {
                id: "p1".to_string(),
                u: "anon".to_string(),
                w: "".to_string(),
            }],
            countdown_ms: None,
        };

        // when:
        let value = serde_json::to_value(&message).unwrap();

        // then:
        assert_eq!(
            value,
            json!({
                "type": "lobby_update",
                "status": "WAITING",
                "players": [{"id": "p1", "u": "anon", "w": ""}]
            })
        );
    }

    #[test]
    fn test_lobby_update_includes_countdown() {
        let message = LobbyUpdateMessage {
            r#type: MessageType::LobbyUpdate,
            status: LobbyStatus::Countdown,
            players: vec![],
            countdown_ms: Some(20_000),
        };

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["status"], "COUNTDOWN");
        assert_eq!(value["countdownMs"], 20_000);
    }

    #[test]
    fn test_match_start_serialization() {
        let message = MatchStartMessage {
            r#type: MessageType::MatchStart,
            seed: 12345,
            world: WorldSize::default().into(),
        };

        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({"type": "match_start", "seed": 12345, "world": {"w": 8000, "h": 8000}})
        );
    }
}
