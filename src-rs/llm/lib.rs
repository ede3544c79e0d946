pub mod models;
pub mod openai_adapter;
pub mod router;
pub mod types;

pub use models::{ModelId, ReasoningEffort};
pub use openai_adapter::{OpenAiCompatAdapter, OpenAiCompatConfig};
pub use router::InvocationClient;
pub use types::{ChatCompletionBody, ContentPart, ImageUrl, Message, MessageContent, ProviderAdapter, ProviderError, Role};
