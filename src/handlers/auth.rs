// Session handlers
// Signup, login and logout

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::info;

use crate::{
    auth::{hash_password, removal_cookie, session_cookie, verify_password},
    error::ApiError,
    models::user::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    state::AppState,
};

/// Register a new user
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let email = request.normalized_email();
    info!("Signup attempt for email: {}", email);

    if state.repo.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let user = state
        .repo
        .insert_user(&email, &hash_password(&request.password))
        .await?;

    info!("Successfully registered user with id: {}", user.id);
    Ok((StatusCode::OK, Json(SignupResponse::from(user))))
}

/// Check credentials and hand out the session cookie
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    let email = request.normalized_email();
    let user = state
        .repo
        .find_user_by_email(&email)
        .await?
        .filter(|user| verify_password(&request.password, &user.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    info!("User {} logged in", user.id);
    let body = LoginResponse {
        message: "logged in",
        user_id: user.id,
    };
    Ok((jar.add(session_cookie(user.id)), Json(body)))
}

/// Drop the session cookie. Always succeeds.
/// POST /logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.add(removal_cookie()), Json(json!({ "message": "logged out" })))
}
