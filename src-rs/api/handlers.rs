use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::agent::{Agent, InvocationOverrides};
use crate::error::InvocationError;
use crate::inference::Profile;
use crate::llm::{Message, ModelId, ReasoningEffort};
use crate::result::{Attempt, InvocationOutcome};

#[derive(Debug, Deserialize)]
pub struct InferRequest {
    pub task: String,
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub reasoning_effort: Option<ReasoningEffort>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InferResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<Attempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub profile: String,
}

pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

pub async fn handle_config(State(agent): State<Arc<Agent>>) -> Json<Value> {
    let resolver = agent.resolver();
    let table = resolver.snapshot();
    Json(json!({
        "source": resolver.source().to_string(),
        "tasks": &*table,
    }))
}

pub async fn handle_profile(
    State(agent): State<Arc<Agent>>,
    Json(req): Json<ProfileRequest>,
) -> (StatusCode, Json<Value>) {
    let swapped = req
        .profile
        .parse::<Profile>()
        .and_then(|profile| agent.use_profile(profile).map(|()| profile));
    match swapped {
        Ok(profile) => (StatusCode::OK, Json(json!({"source": profile.to_string()}))),
        Err(err) => (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()}))),
    }
}

pub async fn handle_infer(
    State(agent): State<Arc<Agent>>,
    Json(req): Json<InferRequest>,
) -> (StatusCode, Json<InferResponse>) {
    if req.messages.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(InferResponse {
                error: Some("messages required".to_string()),
                ..Default::default()
            }),
        );
    }

    let model = match req.model.as_deref().map(str::parse::<ModelId>).transpose() {
        Ok(model) => model,
        Err(err) => return error_response(err.into()),
    };
    let overrides = InvocationOverrides {
        model,
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        reasoning_effort: req.reasoning_effort,
    };

    match agent.infer_named(&req.task, req.messages, overrides).await {
        Ok(outcome) => (StatusCode::OK, Json(to_response(outcome))),
        Err(err) => error_response(err),
    }
}

fn to_response(outcome: InvocationOutcome) -> InferResponse {
    InferResponse {
        success: true,
        model: Some(outcome.model),
        attempt: Some(outcome.attempt),
        response: Some(outcome.body),
        ..Default::default()
    }
}

fn error_response(err: InvocationError) -> (StatusCode, Json<InferResponse>) {
    let code = if err.is_configuration() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    };
    (
        code,
        Json(InferResponse {
            success: false,
            model: err.failed_model(),
            attempt: err.attempt(),
            error: Some(err.to_string()),
            status: err.status(),
            response: None,
        }),
    )
}
