//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{
        conversion,
        http::{HealthDto, LobbyDetailDto},
    },
    ui::state::AppState,
};

/// Plain-text liveness banner
pub async fn banner() -> &'static str {
    "lobby server ok"
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let health = state
        .get_lobby_status_usecase
        .execute(conversion::health)
        .await;
    Json(health)
}

/// Operator view of the registry and lobby state
pub async fn debug_lobby_state(State(state): State<Arc<AppState>>) -> Json<LobbyDetailDto> {
    let detail = state
        .get_lobby_status_usecase
        .execute(conversion::lobby_detail)
        .await;
    Json(detail)
}
