//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{LobbyStatus, ReadyState};

/// Response of the health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub ok: bool,
    pub status: LobbyStatus,
    /// Sessions whose transport is open
    pub players: usize,
    pub countdown_ms: u64,
}

/// Operator view of one tracked session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailDto {
    pub id: String,
    pub username: Option<String>,
    pub wallet: Option<String>,
    pub ready_state: ReadyState,
    pub is_alive: bool,
    /// RFC 3339
    pub connected_at: String,
}

/// Operator view of the whole lobby
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyDetailDto {
    pub status: LobbyStatus,
    pub countdown_ms: u64,
    pub last_player_count: usize,
    pub recent_resets: usize,
    pub open_sessions: usize,
    pub sessions: Vec<SessionDetailDto>,
}
