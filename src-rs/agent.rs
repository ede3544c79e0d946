use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigurationError, InvocationError};
use crate::inference::{ConfigResolver, ModelSpec, Profile, TaskKind};
use crate::llm::{InvocationClient, Message, ModelId, ReasoningEffort};
use crate::result::InvocationOutcome;

/// Per-call adjustments applied on top of the resolved spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationOverrides {
    /// Forces this model. The table's fallback is dropped with it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl InvocationOverrides {
    pub fn is_empty(&self) -> bool {
        self == &InvocationOverrides::default()
    }

    pub fn apply(&self, mut spec: ModelSpec) -> Result<ModelSpec, ConfigurationError> {
        if self.is_empty() {
            return Ok(spec);
        }
        if let Some(model) = self.model {
            spec.primary_model = model;
            spec.fallback_model = None;
        }
        if let Some(max_tokens) = self.max_tokens {
            spec.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            spec.temperature = temperature;
        }
        if let Some(effort) = self.reasoning_effort {
            spec.reasoning_effort = Some(effort);
        }
        spec.validate("override")?;
        Ok(spec)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub task: TaskKind,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub overrides: InvocationOverrides,
}

impl InvocationRequest {
    pub fn new(task: TaskKind, messages: Vec<Message>) -> Self {
        Self {
            task,
            messages,
            overrides: InvocationOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: InvocationOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Entry point for pipeline steps: picks the model for a task and runs it.
pub struct Agent {
    pub name: String,
    resolver: ConfigResolver,
    client: InvocationClient,
}

impl Agent {
    pub fn new(name: &str, resolver: ConfigResolver, client: InvocationClient) -> Self {
        let resolved_name = if name.is_empty() { "agent" } else { name };
        Self {
            name: resolved_name.to_string(),
            resolver,
            client,
        }
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Swaps to a preset table, refusing one that names a model the
    /// provider does not serve. The current table stays active on refusal.
    pub fn use_profile(&self, profile: Profile) -> Result<(), ConfigurationError> {
        self.client.check_table(profile.table())?;
        self.resolver.use_profile(profile);
        Ok(())
    }

    /// Resolved spec for `request`, overrides included. No I/O.
    pub fn plan(&self, request: &InvocationRequest) -> Result<ModelSpec, ConfigurationError> {
        request.overrides.apply(self.resolver.resolve(request.task))
    }

    pub async fn infer(&self, request: &InvocationRequest) -> Result<InvocationOutcome, InvocationError> {
        let spec = self.plan(request)?;
        debug!(
            agent = %self.name,
            task = %request.task,
            model = %spec.primary_model,
            fallback = ?spec.fallback_model,
            "invoking task"
        );
        self.client.invoke(&spec, &request.messages).await
    }

    /// Like [`Agent::infer`] for callers holding a task name. An unknown name
    /// fails before any request is sent.
    pub async fn infer_named(
        &self,
        task: &str,
        messages: Vec<Message>,
        overrides: InvocationOverrides,
    ) -> Result<InvocationOutcome, InvocationError> {
        let task = task.parse::<TaskKind>()?;
        let request = InvocationRequest::new(task, messages).with_overrides(overrides);
        self.infer(&request).await
    }
}
