//! Server state shared by the request handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, GetLobbyStatusUseCase, HandleMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    pub handle_message_usecase: Arc<HandleMessageUseCase>,
    pub get_lobby_status_usecase: Arc<GetLobbyStatusUseCase>,
}
