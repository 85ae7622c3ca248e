//! WebSocket-backed [`LobbyNotifier`].
//!
//! Messages are encoded as JSON text frames and pushed through each
//! session's [`SessionTransport`](crate::domain::SessionTransport). A failed
//! push on one session is logged and skipped; it never affects delivery to
//! the others or the caller.

use serde::Serialize;

use crate::{
    domain::{Lobby, LobbyNotifier, MessagePushError, SessionId, SessionRegistry},
    infrastructure::dto::{
        conversion,
        websocket::{MatchStartMessage, MessageType, PongMessage, WelcomeMessage},
    },
};

/// Notifier delivering JSON frames over the sessions' own transports
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketLobbyNotifier;

impl WebSocketLobbyNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl LobbyNotifier for WebSocketLobbyNotifier {
    fn push_welcome(
        &self,
        lobby: &Lobby,
        id: &SessionId,
        server_time: i64,
    ) -> Result<(), MessagePushError> {
        let welcome = WelcomeMessage {
            r#type: MessageType::Welcome,
            player_id: id.to_string(),
            server_time,
            tick_rate: lobby.rules().client_tick_rate,
        };
        push_to(&lobby.registry, id, &welcome)
    }

    fn push_pong(&self, lobby: &Lobby, id: &SessionId, t: i64) -> Result<(), MessagePushError> {
        let pong = PongMessage {
            r#type: MessageType::Pong,
            t,
        };
        push_to(&lobby.registry, id, &pong)
    }

    fn broadcast_lobby(&self, lobby: &Lobby) -> usize {
        broadcast(&lobby.registry, &conversion::lobby_update(lobby))
    }

    fn broadcast_match_start(&self, lobby: &Lobby, seed: u64) -> usize {
        let message = MatchStartMessage {
            r#type: MessageType::MatchStart,
            seed,
            world: lobby.rules().world.into(),
        };
        broadcast(&lobby.registry, &message)
    }
}

/// Send one message to a single session
pub fn push_to<T: Serialize>(
    registry: &SessionRegistry,
    id: &SessionId,
    message: &T,
) -> Result<(), MessagePushError> {
    let session = registry
        .get(id)
        .ok_or(MessagePushError::SessionNotFound(*id))?;
    let json =
        serde_json::to_string(message).map_err(|e| MessagePushError::Encode(e.to_string()))?;
    session.transport().send_text(&json)?;
    Ok(())
}

/// Send one message to every open session.
///
/// Returns the number of sessions the frame was queued for.
pub fn broadcast<T: Serialize>(registry: &SessionRegistry, message: &T) -> usize {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize broadcast: {}", e);
            return 0;
        }
    };

    let mut delivered = 0;
    for session in registry.all().filter(|session| session.is_open()) {
        match session.transport().send_text(&json) {
            Ok(()) => delivered += 1,
            Err(e) => tracing::debug!("Skipping session '{}' during broadcast: {}", session.id, e),
        }
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ReadyState, Session, Timestamp, TransportError, transport::MockSessionTransport},
        infrastructure::transport::{OutboundFrame, PusherReceiver, WebSocketTransport},
    };

    fn add_open_session(lobby: &mut Lobby) -> (SessionId, PusherReceiver) {
        let (transport, rx, _signal) = WebSocketTransport::channel();
        let id = lobby
            .registry
            .add(Session::new(Box::new(transport), Timestamp::new(1000)));
        (id, rx)
    }

    fn drain_text(rx: &mut PusherReceiver) -> Vec<serde_json::Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            if let OutboundFrame::Text(text) = frame {
                frames.push(serde_json::from_str(&text).unwrap());
            }
        }
        frames
    }

    #[test]
    fn test_push_to_single_session() {
        // given:
        let mut lobby = Lobby::default();
        let (alice, mut alice_rx) = add_open_session(&mut lobby);
        let (_bob, mut bob_rx) = add_open_session(&mut lobby);

        // when:
        let result = push_to(&lobby.registry, &alice, &serde_json::json!({"type": "pong"}));

        // then:
        assert!(result.is_ok());
        assert_eq!(drain_text(&mut alice_rx).len(), 1);
        assert!(drain_text(&mut bob_rx).is_empty());
    }

    #[test]
    fn test_push_to_unknown_session() {
        // given:
        let lobby = Lobby::default();

        // when:
        let result = push_to(&lobby.registry, &SessionId::generate(), &"x");

        // then:
        assert!(matches!(result, Err(MessagePushError::SessionNotFound(_))));
    }

    #[test]
    fn test_push_welcome_carries_id_and_tick_rate() {
        // given:
        let mut lobby = Lobby::default();
        let (alice, mut alice_rx) = add_open_session(&mut lobby);
        let (_bob, mut bob_rx) = add_open_session(&mut lobby);

        // when:
        let result = WebSocketLobbyNotifier.push_welcome(&lobby, &alice, 1234);

        // then:
        assert_eq!(result, Ok(()));
        assert_eq!(
            drain_text(&mut alice_rx),
            vec![serde_json::json!({
                "type": "welcome",
                "playerId": alice.to_string(),
                "serverTime": 1234,
                "tickRate": 30
            })]
        );
        assert!(drain_text(&mut bob_rx).is_empty());
    }

    #[test]
    fn test_push_pong_to_closed_session_fails() {
        // given:
        let mut lobby = Lobby::default();
        let (alice, alice_rx) = add_open_session(&mut lobby);
        drop(alice_rx);

        // when:
        let result = WebSocketLobbyNotifier.push_pong(&lobby, &alice, 5);

        // then:
        assert_eq!(
            result,
            Err(MessagePushError::Transport(TransportError::Closed))
        );
    }

    #[test]
    fn test_broadcast_lobby_reaches_all_open_sessions() {
        // given:
        let mut lobby = Lobby::default();
        let (_a, mut rx_a) = add_open_session(&mut lobby);
        let (_b, mut rx_b) = add_open_session(&mut lobby);

        // when:
        let delivered = WebSocketLobbyNotifier.broadcast_lobby(&lobby);

        // then:
        assert_eq!(delivered, 2);
        let frames = drain_text(&mut rx_a);
        assert_eq!(frames[0]["type"], "lobby_update");
        assert_eq!(frames[0]["players"].as_array().unwrap().len(), 2);
        assert!(frames[0].get("countdownMs").is_none());
        assert_eq!(drain_text(&mut rx_b).len(), 1);
    }

    #[test]
    fn test_broadcast_skips_closed_sessions() {
        // given:
        let mut lobby = Lobby::default();
        let (_open, mut open_rx) = add_open_session(&mut lobby);
        let (_closed, closed_rx) = add_open_session(&mut lobby);
        drop(closed_rx);

        // when:
        let delivered = WebSocketLobbyNotifier.broadcast_lobby(&lobby);

        // then:
        assert_eq!(delivered, 1);
        let frames = drain_text(&mut open_rx);
        // the closed session is still on the roster until pruned
        assert_eq!(frames[0]["players"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_failing_session_does_not_affect_others() {
        // given: a transport that reports open but rejects every push
        let mut lobby = Lobby::default();
        let mut failing = MockSessionTransport::new();
        failing.expect_ready_state().return_const(ReadyState::Open);
        failing
            .expect_send_text()
            .returning(|_| Err(TransportError::PushFailed("broken pipe".to_string())));
        lobby
            .registry
            .add(Session::new(Box::new(failing), Timestamp::new(1000)));
        let (_ok, mut ok_rx) = add_open_session(&mut lobby);

        // when:
        let delivered = WebSocketLobbyNotifier.broadcast_match_start(&lobby, 7);

        // then:
        assert_eq!(delivered, 1);
        let frames = drain_text(&mut ok_rx);
        assert_eq!(frames[0]["type"], "match_start");
        assert_eq!(frames[0]["seed"], 7);
        assert_eq!(frames[0]["world"]["w"], 8000);
    }
}
