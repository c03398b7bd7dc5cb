// Handlers module
// HTTP handlers for the REST API

pub mod ai;
pub mod auth;
pub mod posts;
pub mod values;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Liveness probe. Never touches the database.
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Connectivity probe: runs `SELECT 1` and echoes the value.
/// GET /db-check
pub async fn db_check(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let value = state.repo.ping().await?;

    info!("Database check returned {}", value);
    Ok((StatusCode::OK, Json(json!({ "db": "ok", "value": value }))))
}
