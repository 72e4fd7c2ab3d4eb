//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ParticipantDto, PresenceDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current online count and participant list
pub async fn get_presence(State(state): State<Arc<AppState>>) -> Json<PresenceDto> {
    let snapshot = state.get_presence_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(PresenceDto {
        count: snapshot.count,
        participants: snapshot
            .participants
            .into_iter()
            .map(ParticipantDto::from)
            .collect(),
    })
}
