//! Conversion logic between domain entities and DTOs.

use rally_shared::time::timestamp_to_rfc3339;

use crate::domain::{InboundMessage, Lobby, LobbyStatus, RosterEntry, Session};
use crate::infrastructure::dto::{http, websocket as dto};

impl From<dto::ClientMessage> for InboundMessage {
    fn from(message: dto::ClientMessage) -> Self {
        match message {
            dto::ClientMessage::Hello { username, wallet } => InboundMessage::Hello {
                username: dto::field_text(username.as_ref()),
                wallet: dto::field_text(wallet.as_ref()),
            },
            dto::ClientMessage::Ping => InboundMessage::Ping,
            dto::ClientMessage::ReqLobby => InboundMessage::ReqLobby,
            dto::ClientMessage::Unknown => InboundMessage::Unknown,
        }
    }
}

impl From<RosterEntry> for dto::PlayerInfo {
    fn from(entry: RosterEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            u: entry.name,
            w: entry.wallet,
        }
    }
}

impl From<&Session> for http::SessionDetailDto {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.to_string(),
            username: session
                .display_name
                .as_ref()
                .map(|name| name.as_str().to_string()),
            wallet: session
                .wallet
                .as_ref()
                .map(|wallet| wallet.as_str().to_string()),
            ready_state: session.ready_state(),
            is_alive: session.is_alive,
            connected_at: timestamp_to_rfc3339(session.connected_at.value()),
        }
    }
}

/// Snapshot of the lobby as broadcast to clients
pub fn lobby_update(lobby: &Lobby) -> dto::LobbyUpdateMessage {
    let status = lobby.state.status();
    dto::LobbyUpdateMessage {
        r#type: dto::MessageType::LobbyUpdate,
        status,
        players: lobby
            .registry
            .roster()
            .into_iter()
            .map(dto::PlayerInfo::from)
            .collect(),
        countdown_ms: (status == LobbyStatus::Countdown).then(|| lobby.state.countdown_ms()),
    }
}

pub fn health(lobby: &Lobby) -> http::HealthDto {
    http::HealthDto {
        ok: true,
        status: lobby.state.status(),
        players: lobby.registry.count_open(),
        countdown_ms: lobby.state.countdown_ms(),
    }
}

pub fn lobby_detail(lobby: &Lobby) -> http::LobbyDetailDto {
    let mut sessions: Vec<http::SessionDetailDto> = lobby
        .registry
        .all()
        .map(http::SessionDetailDto::from)
        .collect();
    sessions.sort_by(|a, b| a.connected_at.cmp(&b.connected_at).then(a.id.cmp(&b.id)));

    http::LobbyDetailDto {
        status: lobby.state.status(),
        countdown_ms: lobby.state.countdown_ms(),
        last_player_count: lobby.state.last_player_count(),
        recent_resets: lobby.state.recorded_resets(),
        open_sessions: lobby.registry.count_open(),
        sessions,
    }
}
