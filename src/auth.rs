//! Password hashing and the cookie session.
//!
//! The session token is the user's primary key written into a plain cookie:
//! no signature, no expiry, readable from scripts. Anyone who can guess an id
//! can act as that user. This mirrors how the existing frontend and data
//! behave and is kept on purpose; all cookie handling lives here so a signed
//! token can replace it without touching handlers.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    error::ApiError,
    models::User,
    state::AppState,
};

pub const SESSION_COOKIE_NAME: &str = "valora_session";

/// Lowercase hex SHA-256 of the password.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(plain: &str, hashed: &str) -> bool {
    hash_password(plain) == hashed
}

/// Session cookie carrying the raw user id. Lives for the browser session.
pub fn session_cookie(user_id: i32) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, user_id.to_string()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that overwrites and expires the session, whether or not one was sent.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

/// Reads the session id from the cookie jar. Non-numeric values count as absent.
pub fn session_user_id(jar: &CookieJar) -> Option<i32> {
    let raw = jar.get(SESSION_COOKIE_NAME)?.value();
    match raw.trim().parse::<i32>() {
        Ok(id) => Some(id),
        Err(_) => {
            debug!("Ignoring malformed session cookie");
            None
        }
    }
}

/// The caller resolved from the session cookie, if any.
///
/// Extraction never fails on a missing or stale session; handlers that need
/// a user call [`CurrentUser::require`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn require(self) -> Result<User, ApiError> {
        self.0.ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(user_id) = session_user_id(&jar) else {
            return Ok(CurrentUser(None));
        };

        let user = state.repo.find_user_by_id(user_id).await?;
        Ok(CurrentUser(user))
    }
}
