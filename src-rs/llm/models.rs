use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Provider;
use crate::error::ConfigurationError;

/// Known models, named by their OpenRouter identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "openai/gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "openai/gpt-4o")]
    Gpt4o,
    #[serde(rename = "google/gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "deepseek/deepseek-chat")]
    DeepseekV3,
    #[serde(rename = "deepseek/deepseek-r1")]
    DeepseekR1,
    #[serde(rename = "anthropic/claude-sonnet-4")]
    ClaudeSonnet4,
    #[serde(rename = "qwen/qwen-2.5-72b-instruct")]
    Qwen72bInstruct,
    #[serde(rename = "qwen/qwen3-coder")]
    Qwen3Coder,
}

impl ModelId {
    pub const ALL: [ModelId; 8] = [
        ModelId::Gpt4oMini,
        ModelId::Gpt4o,
        ModelId::Gemini25Pro,
        ModelId::DeepseekV3,
        ModelId::DeepseekR1,
        ModelId::ClaudeSonnet4,
        ModelId::Qwen72bInstruct,
        ModelId::Qwen3Coder,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt4oMini => "openai/gpt-4o-mini",
            ModelId::Gpt4o => "openai/gpt-4o",
            ModelId::Gemini25Pro => "google/gemini-2.5-pro",
            ModelId::DeepseekV3 => "deepseek/deepseek-chat",
            ModelId::DeepseekR1 => "deepseek/deepseek-r1",
            ModelId::ClaudeSonnet4 => "anthropic/claude-sonnet-4",
            ModelId::Qwen72bInstruct => "qwen/qwen-2.5-72b-instruct",
            ModelId::Qwen3Coder => "qwen/qwen3-coder",
        }
    }

    /// Identifier `provider` expects in the request body, or `None` when it
    /// does not serve the model.
    pub const fn wire_name(self, provider: Provider) -> Option<&'static str> {
        match provider {
            Provider::OpenRouter => Some(self.as_str()),
            Provider::Together => match self {
                ModelId::DeepseekV3 => Some("deepseek-ai/DeepSeek-V3"),
                ModelId::DeepseekR1 => Some("deepseek-ai/DeepSeek-R1"),
                ModelId::Qwen72bInstruct => Some("Qwen/Qwen2.5-72B-Instruct-Turbo"),
                ModelId::Qwen3Coder => Some("Qwen/Qwen3-Coder-480B-A35B-Instruct-FP8"),
                ModelId::Gpt4oMini | ModelId::Gpt4o | ModelId::Gemini25Pro | ModelId::ClaudeSonnet4 => None,
            },
        }
    }

    pub fn served_by(self, provider: Provider) -> Result<&'static str, ConfigurationError> {
        self.wire_name(provider)
            .ok_or_else(|| ConfigurationError::UnsupportedModel {
                model: self.as_str().to_string(),
                provider: provider.to_string(),
            })
    }

    /// Whether the provider accepts `reasoning_effort` for this model.
    /// Non-reasoning chat models reject the field outright.
    pub const fn supports_reasoning_effort(self) -> bool {
        matches!(
            self,
            ModelId::DeepseekR1 | ModelId::Gemini25Pro | ModelId::ClaudeSonnet4
        )
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        ModelId::ALL
            .iter()
            .copied()
            .find(|model| model.as_str() == trimmed)
            .ok_or_else(|| ConfigurationError::UnknownModel(trimmed.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReasoningEffort {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            other => Err(ConfigurationError::InvalidSpec {
                task: "reasoning_effort".to_string(),
                reason: format!("unknown reasoning effort: {}", other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_wire_identifiers() {
        for model in ModelId::ALL {
            let encoded = serde_json::to_value(model).unwrap();
            assert_eq!(encoded.as_str(), Some(model.as_str()));
            assert_eq!(model.as_str().parse::<ModelId>().unwrap(), model);
        }
    }

    #[test]
    fn openrouter_sends_catalog_ids() {
        for model in ModelId::ALL {
            assert_eq!(model.wire_name(Provider::OpenRouter), Some(model.as_str()));
        }
    }

    #[test]
    fn together_uses_its_own_ids() {
        assert_eq!(
            ModelId::DeepseekV3.wire_name(Provider::Together),
            Some("deepseek-ai/DeepSeek-V3")
        );
        assert_eq!(
            ModelId::Qwen3Coder.wire_name(Provider::Together),
            Some("Qwen/Qwen3-Coder-480B-A35B-Instruct-FP8")
        );
        for model in ModelId::ALL {
            if let Some(name) = model.wire_name(Provider::Together) {
                assert_ne!(name, model.as_str());
            }
        }
    }

    #[test]
    fn together_does_not_serve_closed_models() {
        let err = ModelId::ClaudeSonnet4.served_by(Provider::Together).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnsupportedModel {
                model: "anthropic/claude-sonnet-4".to_string(),
                provider: "together".to_string(),
            }
        );
        assert_eq!(ModelId::Gpt4o.served_by(Provider::OpenRouter), Ok("openai/gpt-4o"));
    }

    #[test]
    fn unknown_model_is_a_configuration_error() {
        let err = "acme/unknown-1".parse::<ModelId>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownModel("acme/unknown-1".to_string()));
    }

    #[test]
    fn reasoning_effort_parses_case_insensitively() {
        assert_eq!("Medium".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::Medium);
        assert!("extreme".parse::<ReasoningEffort>().is_err());
        assert_eq!(serde_json::to_string(&ReasoningEffort::High).unwrap(), "\"high\"");
    }
}
