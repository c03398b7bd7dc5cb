use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{
        ai::ai_prompt,
        auth::{login, logout, signup},
        db_check, health_check,
        posts::{create_post, list_posts},
        values::get_value,
    },
    state::AppState,
};

/// Create the Axum router with all endpoints.
/// Middleware is applied by the caller so tests can drive the bare router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/health", get(health_check))
        .route("/db-check", get(db_check))
        // Session
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        // Posts
        .route("/posts", post(create_post).get(list_posts))
        // Extras
        .route("/getvalue", post(get_value))
        .route("/ai-prompt", post(ai_prompt))
        .with_state(state)
}
