//! Outbound notification port.
//!
//! Use cases decide *when* sessions are told something; the infrastructure
//! layer decides how it is encoded and delivered.

use thiserror::Error;

use super::{lobby::Lobby, transport::TransportError, value_object::SessionId};

/// Errors raised when pushing a message to a single session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("session '{0}' not found")]
    SessionNotFound(SessionId),

    #[error("failed to encode message: {0}")]
    Encode(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Messages the lobby sends to its sessions.
///
/// Broadcasts reach every open session in `lobby.registry` and report how
/// many sessions the frame was queued for. Per-session failures are never
/// surfaced from a broadcast.
#[cfg_attr(test, mockall::automock)]
pub trait LobbyNotifier: Send + Sync {
    /// One-time greeting for a freshly registered session
    fn push_welcome(
        &self,
        lobby: &Lobby,
        id: &SessionId,
        server_time: i64,
    ) -> Result<(), MessagePushError>;

    /// Reply to a ping from session `id`
    fn push_pong(&self, lobby: &Lobby, id: &SessionId, t: i64) -> Result<(), MessagePushError>;

    /// Current lobby snapshot
    fn broadcast_lobby(&self, lobby: &Lobby) -> usize;

    /// One-shot match start signal
    fn broadcast_match_start(&self, lobby: &Lobby, seed: u64) -> usize;
}
