use std::sync::Arc;

use crate::{ai::AiClient, db::Repository};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub ai: Arc<AiClient>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, ai: AiClient) -> Self {
        AppState {
            repo,
            ai: Arc::new(ai),
        }
    }
}
