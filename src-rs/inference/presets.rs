use std::fmt;
use std::str::FromStr;

use super::table::{AgentConfig, ModelSpec};
use crate::error::ConfigurationError;
use crate::llm::ModelId::{
    ClaudeSonnet4, DeepseekR1, DeepseekV3, Gemini25Pro, Gpt4o, Gpt4oMini, Qwen3Coder, Qwen72bInstruct,
};
use crate::llm::ReasoningEffort::{Low, Medium};

/// Named preset tables. Switching profiles swaps the whole table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    Default,
    CostOptimized,
    Premium,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Default, Profile::CostOptimized, Profile::Premium];

    pub const fn as_str(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::CostOptimized => "cost-optimized",
            Profile::Premium => "premium",
        }
    }

    pub fn table(self) -> &'static AgentConfig {
        match self {
            Profile::Default => &OPENROUTER_AGENT_CONFIG,
            Profile::CostOptimized => &OPENROUTER_COST_OPTIMIZED_CONFIG,
            Profile::Premium => &OPENROUTER_PREMIUM_CONFIG,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "default" | "balanced" => Ok(Profile::Default),
            "cost-optimized" | "cost_optimized" | "cost" => Ok(Profile::CostOptimized),
            "premium" => Ok(Profile::Premium),
            other => Err(ConfigurationError::UnknownProfile(other.to_string())),
        }
    }
}

// A `reasoning_effort` is a per-task hint. It is only sent on an attempt whose
// model accepts it (see `ModelId::supports_reasoning_effort`), so on entries
// like `phase_generation` it stays dormant until the fallback or a model
// override lands on a reasoning model.

/// Balanced OpenRouter table.
pub static OPENROUTER_AGENT_CONFIG: AgentConfig = AgentConfig {
    template_selection: ModelSpec::new(Gpt4oMini, 2000, 0.6).with_fallback(Gemini25Pro),
    blueprint: ModelSpec::new(DeepseekV3, 64000, 0.7)
        .with_reasoning(Medium)
        .with_fallback(ClaudeSonnet4),
    project_setup: ModelSpec::new(Gpt4oMini, 10000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    phase_generation: ModelSpec::new(Qwen72bInstruct, 32000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    first_phase_implementation: ModelSpec::new(Qwen3Coder, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    phase_implementation: ModelSpec::new(Qwen3Coder, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    realtime_code_fixer: ModelSpec::new(Gpt4oMini, 32000, 0.5)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    fast_code_fixer: ModelSpec::new(DeepseekV3, 64000, 0.0).with_fallback(Gpt4oMini),
    conversational_response: ModelSpec::new(DeepseekV3, 4000, 0.7)
        .with_reasoning(Low)
        .with_fallback(Gpt4oMini),
    code_review: ModelSpec::new(ClaudeSonnet4, 32000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(DeepseekR1),
    file_regeneration: ModelSpec::new(Qwen3Coder, 32000, 0.0)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    screenshot_analysis: ModelSpec::new(Gemini25Pro, 8000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(Gpt4o),
};

/// Cheapest models that still hold up for each step.
pub static OPENROUTER_COST_OPTIMIZED_CONFIG: AgentConfig = AgentConfig {
    template_selection: ModelSpec::new(Gpt4oMini, 2000, 0.6).with_fallback(DeepseekV3),
    blueprint: ModelSpec::new(DeepseekV3, 64000, 0.7)
        .with_reasoning(Medium)
        .with_fallback(Gpt4oMini),
    project_setup: ModelSpec::new(DeepseekV3, 10000, 0.2)
        .with_reasoning(Low)
        .with_fallback(Gpt4oMini),
    phase_generation: ModelSpec::new(DeepseekV3, 32000, 0.2)
        .with_reasoning(Low)
        .with_fallback(Gpt4oMini),
    first_phase_implementation: ModelSpec::new(Qwen3Coder, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    phase_implementation: ModelSpec::new(Qwen3Coder, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    realtime_code_fixer: ModelSpec::new(DeepseekV3, 32000, 0.5)
        .with_reasoning(Low)
        .with_fallback(Gpt4oMini),
    fast_code_fixer: ModelSpec::new(DeepseekV3, 64000, 0.0).with_fallback(Gpt4oMini),
    conversational_response: ModelSpec::new(DeepseekV3, 4000, 0.7)
        .with_reasoning(Low)
        .with_fallback(Gpt4oMini),
    code_review: ModelSpec::new(DeepseekV3, 32000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(Gpt4oMini),
    file_regeneration: ModelSpec::new(Qwen3Coder, 32000, 0.0)
        .with_reasoning(Low)
        .with_fallback(DeepseekV3),
    screenshot_analysis: ModelSpec::new(Gpt4oMini, 8000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(DeepseekV3),
};

/// Highest quality models regardless of price.
pub static OPENROUTER_PREMIUM_CONFIG: AgentConfig = AgentConfig {
    template_selection: ModelSpec::new(Gpt4o, 2000, 0.6).with_fallback(ClaudeSonnet4),
    blueprint: ModelSpec::new(ClaudeSonnet4, 64000, 0.7)
        .with_reasoning(Medium)
        .with_fallback(Gpt4o),
    project_setup: ModelSpec::new(Gpt4o, 10000, 0.2)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    phase_generation: ModelSpec::new(Qwen72bInstruct, 32000, 0.2)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    first_phase_implementation: ModelSpec::new(Qwen72bInstruct, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    phase_implementation: ModelSpec::new(Qwen72bInstruct, 64000, 0.2)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    realtime_code_fixer: ModelSpec::new(Gpt4o, 32000, 0.5)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    fast_code_fixer: ModelSpec::new(DeepseekR1, 64000, 0.0).with_fallback(ClaudeSonnet4),
    conversational_response: ModelSpec::new(Gpt4o, 4000, 0.7)
        .with_reasoning(Low)
        .with_fallback(ClaudeSonnet4),
    code_review: ModelSpec::new(ClaudeSonnet4, 32000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(DeepseekR1),
    file_regeneration: ModelSpec::new(ClaudeSonnet4, 32000, 0.0)
        .with_reasoning(Low)
        .with_fallback(Qwen72bInstruct),
    screenshot_analysis: ModelSpec::new(Gemini25Pro, 8000, 0.1)
        .with_reasoning(Medium)
        .with_fallback(Gpt4o),
};
