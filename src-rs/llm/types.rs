use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::models::{ModelId, ReasoningEffort};
use crate::config::Provider;
use crate::error::{ConfigurationError, InvocationError};
use crate::inference::ModelSpec;
use crate::result::Attempt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// User turn carrying a screenshot alongside the prompt text.
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                        detail: None,
                    },
                },
            ]),
        }
    }
}

/// Outbound `/chat/completions` body. Absent fields are omitted, never null.
#[derive(Clone, Debug, Serialize)]
pub struct ChatCompletionBody<'a> {
    /// Provider-specific identifier, see [`ModelId::wire_name`].
    pub model: &'static str,
    pub messages: &'a [Message],
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl<'a> ChatCompletionBody<'a> {
    /// Body for `model` on `provider` using the tuning in `spec`. The
    /// reasoning hint is dropped for models that do not accept it.
    pub fn for_model(
        spec: &ModelSpec,
        model: ModelId,
        provider: Provider,
        messages: &'a [Message],
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            model: model.served_by(provider)?,
            messages,
            max_tokens: spec.max_tokens,
            temperature: spec.temperature,
            reasoning_effort: spec
                .reasoning_effort
                .filter(|_| model.supports_reasoning_effort()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ProviderError {
    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ProviderError {
    pub fn into_invocation(self, model: ModelId, attempt: Attempt) -> InvocationError {
        match self {
            ProviderError::Upstream { status, body } => InvocationError::Upstream {
                model,
                attempt,
                status,
                body,
            },
            ProviderError::Transport(message) => InvocationError::Transport {
                model,
                attempt,
                message,
            },
        }
    }
}

/// One chat-completions call against a provider. Returns the parsed body.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    async fn complete(&self, body: &ChatCompletionBody<'_>) -> Result<Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reasoning_effort_omitted_for_models_without_support() {
        let spec = ModelSpec::new(ModelId::Gpt4oMini, 2000, 0.5).with_reasoning(ReasoningEffort::Low);
        let messages = vec![Message::user("hi")];
        let body = ChatCompletionBody::for_model(&spec, ModelId::Gpt4oMini, Provider::OpenRouter, &messages).unwrap();
        let encoded = serde_json::to_value(&body).unwrap();
        assert!(encoded.get("reasoning_effort").is_none());
        assert_eq!(encoded["model"], "openai/gpt-4o-mini");
        assert_eq!(encoded["max_tokens"], 2000);
    }

    #[test]
    fn reasoning_effort_sent_to_reasoning_models() {
        let spec = ModelSpec::new(ModelId::ClaudeSonnet4, 32000, 0.1).with_reasoning(ReasoningEffort::Medium);
        let messages = vec![Message::user("review this")];
        let body = ChatCompletionBody::for_model(&spec, ModelId::ClaudeSonnet4, Provider::OpenRouter, &messages).unwrap();
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["reasoning_effort"], "medium");
    }

    #[test]
    fn unset_reasoning_effort_is_never_serialized_as_null() {
        let spec = ModelSpec::new(ModelId::DeepseekR1, 64000, 0.0);
        let messages = vec![Message::user("fix")];
        let body = ChatCompletionBody::for_model(&spec, ModelId::DeepseekR1, Provider::OpenRouter, &messages).unwrap();
        let encoded = serde_json::to_string(&body).unwrap();
        assert!(!encoded.contains("reasoning_effort"));
        assert!(!encoded.contains("null"));
    }

    #[test]
    fn together_body_uses_together_model_name() {
        let spec = ModelSpec::new(ModelId::DeepseekR1, 64000, 0.0).with_reasoning(ReasoningEffort::Low);
        let messages = vec![Message::user("fix")];
        let body = ChatCompletionBody::for_model(&spec, ModelId::DeepseekR1, Provider::Together, &messages).unwrap();
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["model"], "deepseek-ai/DeepSeek-R1");
        assert_eq!(encoded["reasoning_effort"], "low");

        let err = ChatCompletionBody::for_model(&spec, ModelId::Gpt4o, Provider::Together, &messages).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnsupportedModel { .. }));
    }

    #[test]
    fn body_fields_keep_declaration_order() {
        let spec = ModelSpec::new(ModelId::ClaudeSonnet4, 100, 0.1).with_reasoning(ReasoningEffort::High);
        let messages = vec![Message::user("hi")];
        let body = ChatCompletionBody::for_model(&spec, ModelId::ClaudeSonnet4, Provider::OpenRouter, &messages).unwrap();
        let value = serde_json::to_value(&body).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["model", "messages", "max_tokens", "temperature", "reasoning_effort"]);
    }

    #[test]
    fn image_messages_use_content_parts() {
        let msg = Message::user_with_image("what is broken?", "data:image/png;base64,AAAA");
        let encoded = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            encoded,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "what is broken?"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}
                ]
            })
        );
        let decoded: Message = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn upstream_provider_error_keeps_status_and_body() {
        let err = ProviderError::Upstream {
            status: 429,
            body: "slow down".to_string(),
        }
        .into_invocation(ModelId::Qwen3Coder, Attempt::Primary);
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.diagnostic(), "slow down");
        assert_eq!(err.attempt(), Some(Attempt::Primary));
    }
}
