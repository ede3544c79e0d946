use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::types::{ChatCompletionBody, ProviderAdapter, ProviderError};
use crate::error::ConfigurationError;

pub struct OpenAiCompatConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Adapter for any endpoint speaking the OpenAI chat-completions protocol
/// (OpenRouter, Together, gateways).
pub struct OpenAiCompatAdapter {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl OpenAiCompatAdapter {
    pub fn new(cfg: OpenAiCompatConfig) -> Result<Self, ConfigurationError> {
        if cfg.base_url.trim().is_empty() {
            return Err(ConfigurationError::MissingSetting("base_url".to_string()));
        }
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingSetting("api_key".to_string()));
        }
        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|err| ConfigurationError::Load(format!("http client: {}", err)))?;
        Ok(Self {
            endpoint: format!("{}/chat/completions", cfg.base_url.trim_end_matches('/')),
            api_key: cfg.api_key,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatAdapter {
    async fn complete(&self, body: &ChatCompletionBody<'_>) -> Result<Value, ProviderError> {
        send_request(&self.client, &self.endpoint, &self.api_key, body).await
    }
}

async fn send_request(
    client: &Client,
    endpoint: &str,
    api_key: &str,
    body: &ChatCompletionBody<'_>,
) -> Result<Value, ProviderError> {
    let resp = client
        .post(endpoint)
        .bearer_auth(api_key)
        .header(CONTENT_TYPE, "application/json")
        .json(body)
        .send()
        .await
        .map_err(|err| ProviderError::Transport(err.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        // Diagnostic only; a failed read leaves it empty.
        let text = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Upstream {
            status: status.as_u16(),
            body: text,
        });
    }

    let text = resp
        .text()
        .await
        .map_err(|err| ProviderError::Transport(err.to_string()))?;
    serde_json::from_str(&text)
        .map_err(|err| ProviderError::Transport(format!("invalid json in response: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, api_key: &str) -> OpenAiCompatConfig {
        OpenAiCompatConfig {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let adapter = OpenAiCompatAdapter::new(config("https://openrouter.ai/api/v1/", "sk-test")).unwrap();
        assert_eq!(adapter.endpoint(), "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let err = OpenAiCompatAdapter::new(config("https://api.together.xyz/v1", " ")).err().unwrap();
        assert_eq!(err, ConfigurationError::MissingSetting("api_key".to_string()));
    }
}
