//! UseCase: session connect.
//!
//! Registers the new session, sends it the one-time welcome packet and
//! broadcasts the lobby so everyone sees the new roster row.

use std::sync::Arc;

use rally_shared::time::Clock;

use crate::domain::{LobbyNotifier, Session, SessionId, SessionTransport, Timestamp};

use super::SharedLobby;

pub struct ConnectSessionUseCase {
    lobby: SharedLobby,
    notifier: Arc<dyn LobbyNotifier>,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(
        lobby: SharedLobby,
        notifier: Arc<dyn LobbyNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lobby,
            notifier,
            clock,
        }
    }

    /// Register a transport as a new session.
    ///
    /// # Returns
    ///
    /// The identifier assigned to the session
    pub async fn execute(&self, transport: Box<dyn SessionTransport>) -> SessionId {
        let now = self.clock.now_millis();
        let mut lobby = self.lobby.lock().await;

        let id = lobby.registry.add(Session::new(transport, Timestamp::new(now)));

        if let Err(e) = self.notifier.push_welcome(&lobby, &id, now) {
            tracing::warn!("Failed to send welcome to '{}': {}", id, e);
        }
        self.notifier.broadcast_lobby(&lobby);

        tracing::info!("Session '{}' connected ({} open)", id, lobby.registry.count_open());

        id
    }
}
