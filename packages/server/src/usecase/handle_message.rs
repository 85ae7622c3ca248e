//! UseCase: inbound client message dispatch.
//!
//! - `ping` replies `pong` to the sender only
//! - `hello` stores the identity fields and evaluates a player join
//! - `req_lobby` re-broadcasts the current snapshot
//! - anything else is ignored

use std::sync::Arc;

use rally_shared::time::Clock;

use crate::domain::{InboundMessage, JoinOutcome, LobbyNotifier, SessionId};

use super::{SharedLobby, error::HandleMessageError};

/// What handling a message did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEffect {
    Ponged,
    Joined(JoinOutcome),
    Rebroadcast,
    Ignored,
}

pub struct HandleMessageUseCase {
    lobby: SharedLobby,
    notifier: Arc<dyn LobbyNotifier>,
    clock: Arc<dyn Clock>,
}

impl HandleMessageUseCase {
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

    /// Dispatch a decoded client message from session `id`.
    pub async fn execute(
        &self,
        id: SessionId,
        message: InboundMessage,
    ) -> Result<MessageEffect, HandleMessageError> {
        let mut lobby = self.lobby.lock().await;
        let session = lobby
            .registry
            .get_mut(&id)
            .ok_or(HandleMessageError::SessionNotFound(id))?;
        session.is_alive = true;

        match message {
            InboundMessage::Ping => {
                let now = self.clock.now_millis();
                if let Err(e) = self.notifier.push_pong(&lobby, &id, now) {
                    tracing::debug!("Failed to send pong to '{}': {}", id, e);
                }
                Ok(MessageEffect::Ponged)
            }
            InboundMessage::Hello { username, wallet } => {
                session.identify(Some(&username), Some(&wallet));
                tracing::info!(
                    "Session '{}' said hello as '{}'",
                    id,
                    session.roster_entry().name
                );

                let open_count = lobby.registry.count_open();
                let outcome = lobby
                    .state
                    .on_player_join(open_count, self.clock.now_millis());
                tracing::debug!(
                    "Player join evaluated: {:?} ({} open, status {})",
                    outcome,
                    open_count,
                    lobby.state.status()
                );
                self.notifier.broadcast_lobby(&lobby);
                Ok(MessageEffect::Joined(outcome))
            }
            InboundMessage::ReqLobby => {
                self.notifier.broadcast_lobby(&lobby);
                Ok(MessageEffect::Rebroadcast)
            }
            InboundMessage::Unknown => Ok(MessageEffect::Ignored),
        }
    }

    /// Record that session `id` showed signs of life (any inbound frame).
    pub async fn mark_alive(&self, id: &SessionId) {
        if let Some(session) = self.lobby.lock().await.registry.get_mut(id) {
            session.is_alive = true;
        }
    }
}
