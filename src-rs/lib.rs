pub mod agent;
pub mod config;
pub mod error;
pub mod helpers;
pub mod result;

#[path = "llm/lib.rs"]
pub mod llm;
#[path = "inference/lib.rs"]
pub mod inference;
#[path = "api/lib.rs"]
pub mod api;

pub use agent::{Agent, InvocationOverrides, InvocationRequest};
pub use config::{InferenceConfig, Provider};
pub use error::{ConfigurationError, InvocationError};
pub use inference::{AgentConfig, ConfigResolver, ModelSpec, Profile, TaskKind};
pub use result::{Attempt, InvocationOutcome};
