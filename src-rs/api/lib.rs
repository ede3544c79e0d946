pub use crate::agent::{Agent, InvocationOverrides, InvocationRequest};
pub use crate::inference::{AgentConfig, ConfigResolver, ModelSpec, Profile, TaskKind};
pub use crate::llm::{Message, ModelId, ReasoningEffort};
pub use crate::result::{Attempt, InvocationOutcome};

pub mod handlers;
pub mod server;
