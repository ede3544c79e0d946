use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::task::TaskKind;
use crate::error::ConfigurationError;
use crate::llm::{ModelId, ReasoningEffort};

pub const MAX_TEMPERATURE: f32 = 2.0;

/// Model choice and sampling parameters for one task kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    #[serde(alias = "name")]
    pub primary_model: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_model: Option<ModelId>,
    #[serde(alias = "max_tokens")]
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(default, alias = "reasoning_effort", skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl ModelSpec {
    pub const fn new(primary_model: ModelId, max_tokens: u32, temperature: f32) -> Self {
        Self {
            primary_model,
            fallback_model: None,
            max_tokens,
            temperature,
            reasoning_effort: None,
        }
    }

    pub const fn with_fallback(mut self, model: ModelId) -> Self {
        self.fallback_model = Some(model);
        self
    }

    pub const fn with_reasoning(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    pub fn validate(&self, task: &str) -> Result<(), ConfigurationError> {
        if self.max_tokens == 0 {
            return Err(ConfigurationError::InvalidSpec {
                task: task.to_string(),
                reason: "maxTokens must be positive".to_string(),
            });
        }
        // NaN fails the range check as well.
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigurationError::InvalidSpec {
                task: task.to_string(),
                reason: format!("temperature {} outside [0, {}]", self.temperature, MAX_TEMPERATURE),
            });
        }
        Ok(())
    }
}

/// Complete task table. One field per [`TaskKind`], so a table missing an
/// entry cannot be built or deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AgentConfig {
    pub template_selection: ModelSpec,
    pub blueprint: ModelSpec,
    pub project_setup: ModelSpec,
    pub phase_generation: ModelSpec,
    pub first_phase_implementation: ModelSpec,
    pub phase_implementation: ModelSpec,
    pub realtime_code_fixer: ModelSpec,
    pub fast_code_fixer: ModelSpec,
    pub conversational_response: ModelSpec,
    pub code_review: ModelSpec,
    pub file_regeneration: ModelSpec,
    pub screenshot_analysis: ModelSpec,
}

impl AgentConfig {
    pub fn get(&self, task: TaskKind) -> &ModelSpec {
        match task {
            TaskKind::TemplateSelection => &self.template_selection,
            TaskKind::Blueprint => &self.blueprint,
            TaskKind::ProjectSetup => &self.project_setup,
            TaskKind::PhaseGeneration => &self.phase_generation,
            TaskKind::FirstPhaseImplementation => &self.first_phase_implementation,
            TaskKind::PhaseImplementation => &self.phase_implementation,
            TaskKind::RealtimeCodeFixer => &self.realtime_code_fixer,
            TaskKind::FastCodeFixer => &self.fast_code_fixer,
            TaskKind::ConversationalResponse => &self.conversational_response,
            TaskKind::CodeReview => &self.code_review,
            TaskKind::FileRegeneration => &self.file_regeneration,
            TaskKind::ScreenshotAnalysis => &self.screenshot_analysis,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskKind, &ModelSpec)> + '_ {
        TaskKind::ALL.into_iter().map(move |task| (task, self.get(task)))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (task, spec) in self.iter() {
            spec.validate(task.as_str())?;
        }
        Ok(())
    }

    /// Parses and validates a host-supplied table.
    pub fn from_json(raw: &str) -> Result<Self, ConfigurationError> {
        let table: AgentConfig =
            serde_json::from_str(raw).map_err(|err| ConfigurationError::Load(err.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| ConfigurationError::Load(format!("{}: {}", path.display(), err)))?;
        Self::from_json(&raw)
    }
}
