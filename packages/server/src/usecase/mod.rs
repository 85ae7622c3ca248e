//! UseCase layer.
//!
//! Every use case locks the shared [`Lobby`] for its whole operation, so
//! registry mutation, state transitions and broadcasts are serialized on a
//! single timeline no matter which task (connection handler, lobby tick,
//! liveness sweep, HTTP status request) drives them.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::Lobby;

mod connect_session;
mod disconnect_session;
mod error;
mod get_lobby_status;
mod handle_message;
mod sweep_sessions;
mod tick_lobby;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::HandleMessageError;
pub use get_lobby_status::GetLobbyStatusUseCase;
pub use handle_message::{HandleMessageUseCase, MessageEffect};
pub use sweep_sessions::{SweepReport, SweepSessionsUseCase};
pub use tick_lobby::TickLobbyUseCase;

/// Registry and lobby state behind the single serialization lock
pub type SharedLobby = Arc<Mutex<Lobby>>;
