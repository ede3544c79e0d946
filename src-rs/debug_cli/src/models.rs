use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub task: String,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub debug: bool,
    pub token: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct InferRequest {
    pub task: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct InferResponse {
    pub success: bool,
    pub model: Option<String>,
    pub attempt: Option<String>,
    pub response: Option<Value>,
    pub error: Option<String>,
    pub status: Option<u16>,
}

impl InferResponse {
    pub fn content(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpecView {
    pub primary_model: String,
    pub fallback_model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub reasoning_effort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigView {
    pub source: String,
    pub tasks: BTreeMap<String, TaskSpecView>,
}
