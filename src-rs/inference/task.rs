use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Discrete steps of the code-generation pipeline, each tuned separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    TemplateSelection,
    Blueprint,
    ProjectSetup,
    PhaseGeneration,
    FirstPhaseImplementation,
    PhaseImplementation,
    RealtimeCodeFixer,
    FastCodeFixer,
    ConversationalResponse,
    CodeReview,
    FileRegeneration,
    ScreenshotAnalysis,
}

impl TaskKind {
    pub const ALL: [TaskKind; 12] = [
        TaskKind::TemplateSelection,
        TaskKind::Blueprint,
        TaskKind::ProjectSetup,
        TaskKind::PhaseGeneration,
        TaskKind::FirstPhaseImplementation,
        TaskKind::PhaseImplementation,
        TaskKind::RealtimeCodeFixer,
        TaskKind::FastCodeFixer,
        TaskKind::ConversationalResponse,
        TaskKind::CodeReview,
        TaskKind::FileRegeneration,
        TaskKind::ScreenshotAnalysis,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TaskKind::TemplateSelection => "templateSelection",
            TaskKind::Blueprint => "blueprint",
            TaskKind::ProjectSetup => "projectSetup",
            TaskKind::PhaseGeneration => "phaseGeneration",
            TaskKind::FirstPhaseImplementation => "firstPhaseImplementation",
            TaskKind::PhaseImplementation => "phaseImplementation",
            TaskKind::RealtimeCodeFixer => "realtimeCodeFixer",
            TaskKind::FastCodeFixer => "fastCodeFixer",
            TaskKind::ConversationalResponse => "conversationalResponse",
            TaskKind::CodeReview => "codeReview",
            TaskKind::FileRegeneration => "fileRegeneration",
            TaskKind::ScreenshotAnalysis => "screenshotAnalysis",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        TaskKind::ALL
            .iter()
            .copied()
            .find(|task| task.as_str() == trimmed)
            .ok_or_else(|| ConfigurationError::UnknownTask(trimmed.to_string()))
    }
}
