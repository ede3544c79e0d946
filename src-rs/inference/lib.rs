pub mod presets;
pub mod resolver;
pub mod table;
pub mod task;

pub use presets::{
    Profile, OPENROUTER_AGENT_CONFIG, OPENROUTER_COST_OPTIMIZED_CONFIG, OPENROUTER_PREMIUM_CONFIG,
};
pub use resolver::{ConfigResolver, TableSource};
pub use table::{AgentConfig, ModelSpec};
pub use task::TaskKind;
