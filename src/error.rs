use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio_postgres::error::SqlState;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway(message.into())
    }

    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            // Duplicate signups surface as a plain 400, which is what existing clients check for.
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED"),
            ApiError::Gateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        let message = match self {
            ApiError::Database(ref err) => {
                if err.contains("timeout") {
                    tracing::warn!("PostgreSQL operation timeout: {}", err);
                } else {
                    tracing::error!("PostgreSQL database error: {}", err);
                }

                // Don't leak driver details to the caller
                if err.contains("timeout") {
                    "Database operation timed out, please try again".to_string()
                } else if err.contains("unavailable") || err.contains("connection") {
                    "Database service is temporarily unavailable".to_string()
                } else {
                    "A database error occurred".to_string()
                }
            }
            ApiError::Validation(message)
            | ApiError::Conflict(message)
            | ApiError::Unauthorized(message) => {
                tracing::debug!("Client error ({}): {}", error_code, message);
                message
            }
            ApiError::NotConfigured(message) => {
                tracing::error!("Server misconfiguration: {}", message);
                message
            }
            ApiError::Gateway(message) => {
                tracing::error!("Upstream failure: {}", message);
                message
            }
            ApiError::Internal(ref err) => {
                tracing::error!("Internal server error: {:#}", err);
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

// PostgreSQL error mapping
impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code() {
            Some(&SqlState::UNIQUE_VIOLATION) => {
                // users.email is the only unique column besides primary keys
                let message = if err.to_string().contains("email") {
                    "Email already registered".to_string()
                } else {
                    "Resource already exists".to_string()
                };
                ApiError::Conflict(message)
            }
            Some(&SqlState::FOREIGN_KEY_VIOLATION) => {
                ApiError::Validation("Referenced user does not exist".to_string())
            }
            Some(&SqlState::NOT_NULL_VIOLATION) => {
                ApiError::Validation("Required field is missing".to_string())
            }
            Some(&SqlState::STRING_DATA_RIGHT_TRUNCATION) => {
                ApiError::Validation("Text data exceeds maximum length".to_string())
            }
            Some(&SqlState::CONNECTION_EXCEPTION)
            | Some(&SqlState::CONNECTION_DOES_NOT_EXIST)
            | Some(&SqlState::CONNECTION_FAILURE) => {
                tracing::error!("PostgreSQL connection error: {}", err);
                ApiError::Database("Database connection unavailable".to_string())
            }
            _ => {
                tracing::error!("Unhandled PostgreSQL error: {} (code: {:?})", err, err.code());
                ApiError::Database("Database operation failed".to_string())
            }
        }
    }
}

// Connection pool error mapping
impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        match err {
            deadpool_postgres::PoolError::Timeout(_) => {
                tracing::warn!("Database connection pool timeout: {}", err);
                ApiError::Database("Database connection timeout".to_string())
            }
            deadpool_postgres::PoolError::Closed => {
                tracing::error!("Database connection pool is closed: {}", err);
                ApiError::Database("Database service unavailable".to_string())
            }
            deadpool_postgres::PoolError::NoRuntimeSpecified => {
                tracing::error!("Database pool runtime error: {}", err);
                ApiError::Internal(anyhow::anyhow!("Database configuration error"))
            }
            _ => {
                tracing::error!("Database connection pool error: {}", err);
                ApiError::Database("Database connection unavailable".to_string())
            }
        }
    }
}

// Result type alias for convenience
pub type ApiResult<T> = Result<T, ApiError>;
