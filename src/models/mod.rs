// Models module

pub mod user;
pub mod post;

// Re-export commonly used types
pub use user::{User, SignupRequest, LoginRequest, SignupResponse, LoginResponse};
pub use post::{Post, PostWithAuthor, CreatePostRequest};
