//! Anthropic Messages API provider
//!
//! Sends the recommendation prompt as a single user message and returns
//! the first content block of the reply. API errors arrive as a JSON
//! envelope, which is surfaced over the bare HTTP status when present.

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::providers::GenerativeProvider;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct AnthropicProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[async_trait::async_trait]
impl GenerativeProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/v1/messages", self.api_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // The API reports failures as an error envelope with a 4xx/5xx
        // status; prefer its message when one parses
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return Err(AppError::ExternalApi(envelope.error.message));
        }
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!(
                "Anthropic API returned status {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse Anthropic response: {}", e))
        })?;

        let text = parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| AppError::ExternalApi("Anthropic reply had no content".to_string()))?;

        tracing::info!(
            provider = self.name(),
            model = %self.model,
            reply_chars = text.len(),
            "Received generative reply"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
