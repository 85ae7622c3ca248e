//! UseCase: lobby status for the HTTP endpoints.

use crate::domain::Lobby;

use super::SharedLobby;

pub struct GetLobbyStatusUseCase {
    lobby: SharedLobby,
}

impl GetLobbyStatusUseCase {
    pub fn new(lobby: SharedLobby) -> Self {
        Self { lobby }
    }

    /// Read a view of the lobby under the lock.
    ///
    /// `view` must not block; the lobby tick and every session wait on it.
    pub async fn execute<T>(&self, view: impl FnOnce(&Lobby) -> T) -> T {
        view(&*self.lobby.lock().await)
    }
}
