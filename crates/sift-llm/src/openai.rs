use async_trait::async_trait;
use sift_core::{ChatMessage, ChatRole, Result, SiftError};
use std::time::Duration;
use tracing::debug;

use crate::client::LlmClient;

/// OpenAI-compatible chat API adapter (works with OpenAI, Azure,
/// Together, vLLM, etc.)
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: "https://api.openai.com/v1".into(),
            model,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    /// Use a custom base URL (for Azure, Together, vLLM, etc.)
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let wire_messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::System => "system",
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                };
                serde_json::json!({ "role": role, "content": m.content })
            })
            .collect();

        let body = serde_json::json!({
            "model": &self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": wire_messages,
        });

        debug!(model = %self.model, messages = messages.len(), "sending chat request");

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| SiftError::LlmUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(SiftError::LlmUnavailable(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SiftError::LlmUnavailable(e.to_string()))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        if content.is_empty() {
            return Err(SiftError::LlmEmptyReply);
        }

        Ok(content)
    }
}
