use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::inference::ModelSpec;
use crate::llm::ModelId;

/// Which leg of an invocation produced a response or an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attempt {
    Primary,
    Fallback,
}

impl Attempt {
    /// Transition taken when the current attempt fails. Only the primary
    /// attempt can move on, and only if the `ModelSpec` names a fallback model.
    pub(crate) fn after_failure(self, spec: &ModelSpec) -> Option<(Attempt, ModelId)> {
        match self {
            Attempt::Primary => spec.fallback_model.map(|model| (Attempt::Fallback, model)),
            Attempt::Fallback => None,
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Primary => write!(f, "primary"),
            Attempt::Fallback => write!(f, "fallback"),
        }
    }
}

/// Successful invocation. `body` is the provider response exactly as parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvocationOutcome {
    pub body: Value,
    pub model: ModelId,
    pub attempt: Attempt,
}

impl InvocationOutcome {
    /// `choices[0].message.content` when the provider returned plain text.
    pub fn content(&self) -> Option<&str> {
        self.body
            .get("choices")
            .and_then(|v| v.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|v| v.as_str())
    }

    pub fn used_fallback(&self) -> bool {
        self.attempt == Attempt::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_reads_first_choice() {
        let outcome = InvocationOutcome {
            body: json!({"choices": [{"message": {"content": "fixed code"}}]}),
            model: ModelId::Gpt4oMini,
            attempt: Attempt::Fallback,
        };
        assert_eq!(outcome.content(), Some("fixed code"));
        assert!(outcome.used_fallback());
    }

    #[test]
    fn content_is_none_without_choices() {
        let outcome = InvocationOutcome {
            body: json!({"error": "nothing"}),
            model: ModelId::Gpt4oMini,
            attempt: Attempt::Primary,
        };
        assert_eq!(outcome.content(), None);
    }

    #[test]
    fn fallback_attempt_is_terminal() {
        let spec = ModelSpec::new(ModelId::DeepseekV3, 1000, 0.0).with_fallback(ModelId::Gpt4oMini);
        assert_eq!(
            Attempt::Primary.after_failure(&spec),
            Some((Attempt::Fallback, ModelId::Gpt4oMini))
        );
        assert_eq!(Attempt::Fallback.after_failure(&spec), None);

        let lone = ModelSpec::new(ModelId::DeepseekV3, 1000, 0.0);
        assert_eq!(Attempt::Primary.after_failure(&lone), None);
    }
}
