// Library root for the Valora backend

pub mod ai;
pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod series;
pub mod state;

// Re-export commonly used types
pub use app::create_router;
pub use db::{Database, Repository};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
