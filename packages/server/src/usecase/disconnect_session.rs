//! UseCase: session disconnect.

use std::sync::Arc;

use crate::domain::{DisconnectOutcome, LobbyNotifier, SessionId};

use super::SharedLobby;

pub struct DisconnectSessionUseCase {
    lobby: SharedLobby,
    notifier: Arc<dyn LobbyNotifier>,
}

impl DisconnectSessionUseCase {
    pub fn new(lobby: SharedLobby, notifier: Arc<dyn LobbyNotifier>) -> Self {
        Self { lobby, notifier }
    }

    /// Remove session `id` and re-evaluate the lobby.
    ///
    /// Idempotent: a session already pruned by a sweep is simply absent.
    /// Nothing is broadcast once the match has started.
    pub async fn execute(&self, id: SessionId) -> DisconnectOutcome {
        let mut lobby = self.lobby.lock().await;
        if lobby.registry.remove(&id).is_some() {
            tracing::info!("Session '{}' disconnected and removed from registry", id);
        }

        let open_count = lobby.registry.count_open();
        let outcome = lobby.state.on_disconnect(open_count);
        if outcome == DisconnectOutcome::Reverted {
            tracing::info!("Lobby back to waiting ({} open)", open_count);
        }
        if outcome != DisconnectOutcome::Ignored {
            self.notifier.broadcast_lobby(&lobby);
        }
        outcome
    }
}
