//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConnectionListDto, ConnectionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current registry contents in connect order (for debugging)
pub async fn list_connections(State(state): State<Arc<AppState>>) -> Json<ConnectionListDto> {
    let connections = state.list_connections_usecase.execute().await;

    // Domain Model から DTO への変換
    let connections: Vec<ConnectionSummaryDto> = connections
        .iter()
        .map(|connection| ConnectionSummaryDto::from(connection.as_ref()))
        .collect();

    Json(ConnectionListDto {
        total: connections.len(),
        connections,
    })
}
