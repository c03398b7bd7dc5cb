use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 255;

/// Post row as stored; the author is referenced only by id.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Post joined with its author's email, the shape every post endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_email: String,
}

/// Request structure for creating a new post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn with_author(self, author_email: impl Into<String>) -> PostWithAuthor {
        PostWithAuthor {
            id: self.id,
            title: self.title,
            content: self.content,
            author_email: author_email.into(),
        }
    }
}

impl CreatePostRequest {
    /// Only the column width is enforced; the title is stored exactly as sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title cannot exceed {} characters", MAX_TITLE_LEN));
        }

        Ok(())
    }
}
