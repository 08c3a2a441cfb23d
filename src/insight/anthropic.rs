//! Anthropic Messages API generator

use super::{InsightError, InsightGenerator, InsightSummary};
use crate::config::InsightConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_VERSION: &str = "2023-06-01";

/// Explanation generator backed by the Anthropic Messages API
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicGenerator {
    /// Create a generator with an explicit key
    pub fn new(config: &InsightConfig, api_key: impl Into<String>) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Create a generator reading the key from `config.api_key_env`
    pub fn from_env(config: &InsightConfig) -> Result<Self, InsightError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InsightError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }
}

#[async_trait]
impl InsightGenerator for AnthropicGenerator {
    async fn generate(&self, summary: &InsightSummary) -> Result<String, InsightError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: summary.prompt(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let response: MessagesResponse = response.json().await?;
        let text = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(InsightError::EmptyResponse);
        }

        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}
