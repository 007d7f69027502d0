//! OpenAI chat-completions client.
//!
//! One client instance is built at startup and shared through `AppState`;
//! handlers never construct their own. The client asks the API to constrain
//! its reply to a single JSON object and hands the raw text back to the
//! normalizer untouched.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::plan::PlanError;

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client. `base_url` is overridable for tests and proxies.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        tracing::info!(model = model, "OpenAI client initialized");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Send one system + user exchange and return the assistant's text.
    ///
    /// `response_format: json_object` forces a parseable reply; whether it
    /// actually parses is the normalizer's concern, not this client's.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<String, PlanError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user}
            ],
            "response_format": {"type": "json_object"},
            "temperature": 0.7,
        });

        debug!(model = %self.model, "OpenAI chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "OpenAI request failed");
                PlanError::Upstream(anyhow!("OpenAI API unavailable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, detail = %detail, "OpenAI API error");
            return Err(PlanError::Upstream(anyhow!("OpenAI API error ({status})")));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Failed to parse OpenAI response envelope");
            PlanError::Upstream(anyhow!("Invalid OpenAI response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(PlanError::EmptyResponse)
    }
}
