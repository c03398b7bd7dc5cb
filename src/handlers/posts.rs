// Post handlers
// HTTP handlers for post management operations

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::post::CreatePostRequest,
    state::AppState,
};

/// Create a post owned by the session user
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user.require()?;
    request.validate().map_err(ApiError::Validation)?;

    info!("Creating new post for user_id: {} with title: {}", user.id, request.title);

    let post = state
        .repo
        .insert_post(user.id, &request.title, &request.content)
        .await?;

    info!("Successfully created post with id: {}", post.id);
    Ok((StatusCode::OK, Json(post.with_author(user.email))))
}

/// List every post with its author's email
/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state.repo.list_posts_with_authors().await?;

    info!("Retrieved {} posts", posts.len());
    Ok((StatusCode::OK, Json(posts)))
}
