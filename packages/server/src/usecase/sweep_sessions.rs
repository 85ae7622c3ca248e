//! UseCase: liveness sweep.
//!
//! Drops sessions whose transport is no longer open and pings the rest.
//! The sweep never touches lobby state and never broadcasts.

use crate::domain::SessionId;

use super::SharedLobby;

/// Outcome of one sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Sessions removed because their transport was not open
    pub pruned: Vec<SessionId>,
    /// Sessions that were sent a liveness ping
    pub pinged: usize,
}

pub struct SweepSessionsUseCase {
    lobby: SharedLobby,
}

impl SweepSessionsUseCase {
    pub fn new(lobby: SharedLobby) -> Self {
        Self { lobby }
    }

    pub async fn execute(&self) -> SweepReport {
        let mut lobby = self.lobby.lock().await;
        let pruned = lobby.registry.prune_closed();

        let mut pinged = 0;
        for session in lobby.registry.all_mut() {
            session.is_alive = false;
            match session.transport().send_ping() {
                Ok(()) => pinged += 1,
                Err(e) => tracing::debug!("Ping to '{}' failed: {}", session.id, e),
            }
        }

        tracing::debug!("Sweep pruned {} sessions, pinged {}", pruned.len(), pinged);
        SweepReport { pruned, pinged }
    }
}
