use thiserror::Error;

use crate::llm::ModelId;
use crate::result::Attempt;

/// Caller or configuration mistakes. Never retried.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown task kind: {0}")]
    UnknownTask(String),

    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("model {model} is not served by {provider}")]
    UnsupportedModel { model: String, provider: String },

    #[error("invalid model spec for {task}: {reason}")]
    InvalidSpec { task: String, reason: String },

    #[error("missing setting: {0}")]
    MissingSetting(String),

    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("failed to load agent config: {0}")]
    Load(String),
}

/// Failure surfaced by an invocation after the fallback (if any) was spent.
#[derive(Clone, Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("{attempt} model {model} returned {status}: {body}")]
    Upstream {
        model: ModelId,
        attempt: Attempt,
        status: u16,
        body: String,
    },

    #[error("{attempt} model {model} transport failure: {message}")]
    Transport {
        model: ModelId,
        attempt: Attempt,
        message: String,
    },
}

impl InvocationError {
    pub fn status(&self) -> Option<u16> {
        match self {
            InvocationError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The model whose call produced this error, if a call was made at all.
    pub fn failed_model(&self) -> Option<ModelId> {
        match self {
            InvocationError::Upstream { model, .. } | InvocationError::Transport { model, .. } => Some(*model),
            InvocationError::Configuration(_) => None,
        }
    }

    pub fn attempt(&self) -> Option<Attempt> {
        match self {
            InvocationError::Upstream { attempt, .. } | InvocationError::Transport { attempt, .. } => Some(*attempt),
            InvocationError::Configuration(_) => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, InvocationError::Configuration(_))
    }

    /// Diagnostic text captured from the provider, empty when none was read.
    pub fn diagnostic(&self) -> &str {
        match self {
            InvocationError::Upstream { body, .. } => body,
            InvocationError::Transport { message, .. } => message,
            InvocationError::Configuration(_) => "",
        }
    }
}
