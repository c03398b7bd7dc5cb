// AI handler
// Relays one prompt to the chat-completion provider

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AiPromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct AiPromptResponse {
    pub answer: String,
}

/// POST /ai-prompt
pub async fn ai_prompt(
    State(state): State<AppState>,
    Json(request): Json<AiPromptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(
        "Forwarding prompt ({} chars), provider configured: {}",
        request.prompt.len(),
        state.ai.is_configured()
    );

    let answer = state.ai.complete(&request.prompt).await?;

    Ok((StatusCode::OK, Json(AiPromptResponse { answer })))
}
