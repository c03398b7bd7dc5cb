use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::AiConfig,
    error::{ApiError, ApiResult},
};

/// Client for the chat-completion provider behind `/ai-prompt`.
///
/// One prompt in, the first completion's text out. No retries, no streaming.
#[derive(Debug, Clone)]
pub struct AiClient {
    http: Client,
    config: AiConfig,
}

/// Request payload sent to the chat completion API.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl AiClient {
    /// Builds the HTTP client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialised.
    pub fn new(config: AiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn complete(&self, prompt: &str) -> ApiResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::NotConfigured("AI backend not configured".to_string()))?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| ApiError::gateway(format!("AI provider error: {err}")))?;

        let status = response.status();
        debug!("AI provider responded with status {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_owned());
            return Err(ApiError::gateway(format!(
                "AI provider returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|err| ApiError::gateway(format!("AI provider sent an unexpected payload: {err}")))?;

        let answer = chat
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ApiError::gateway("AI provider returned no choices"))?;

        info!("AI completion received ({} chars)", answer.len());
        Ok(answer)
    }
}
