use std::sync::Arc;

use tracing::{debug, error, warn};

use super::models::ModelId;
use super::types::{ChatCompletionBody, Message, ProviderAdapter};
use crate::config::Provider;
use crate::error::{ConfigurationError, InvocationError};
use crate::inference::{AgentConfig, ModelSpec};
use crate::result::{Attempt, InvocationOutcome};

/// Executes a chat completion for a resolved [`ModelSpec`], substituting the
/// fallback model at most once.
#[derive(Clone)]
pub struct InvocationClient {
    adapter: Arc<dyn ProviderAdapter>,
    provider: Provider,
}

impl InvocationClient {
    /// Client speaking OpenRouter model names through `adapter`.
    pub fn new(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            adapter,
            provider: Provider::OpenRouter,
        }
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Fails when either model of `spec` has no name on this client's provider.
    pub fn check_served(&self, spec: &ModelSpec) -> Result<(), ConfigurationError> {
        spec.primary_model.served_by(self.provider)?;
        if let Some(fallback) = spec.fallback_model {
            fallback.served_by(self.provider)?;
        }
        Ok(())
    }

    pub fn check_table(&self, table: &AgentConfig) -> Result<(), ConfigurationError> {
        table.iter().try_for_each(|(_, spec)| self.check_served(spec))
    }

    /// Primary attempt, then (on any upstream or transport failure) a single
    /// fallback attempt when the `ModelSpec` names one. The error returned is the
    /// one from the last attempt made.
    pub async fn invoke(
        &self,
        spec: &ModelSpec,
        messages: &[Message],
    ) -> Result<InvocationOutcome, InvocationError> {
        self.check_served(spec)?;
        let mut attempt = Attempt::Primary;
        let mut model = spec.primary_model;
        loop {
            let err = match self.call(spec, model, attempt, messages).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) => err,
            };
            match attempt.after_failure(spec) {
                Some((next, fallback)) => {
                    warn!(
                        model = %model,
                        fallback = %fallback,
                        error = %err,
                        "primary model failed, trying fallback"
                    );
                    attempt = next;
                    model = fallback;
                }
                None => {
                    error!(model = %model, %attempt, error = %err, "invocation failed");
                    return Err(err);
                }
            }
        }
    }

    async fn call(
        &self,
        spec: &ModelSpec,
        model: ModelId,
        attempt: Attempt,
        messages: &[Message],
    ) -> Result<InvocationOutcome, InvocationError> {
        let body = ChatCompletionBody::for_model(spec, model, self.provider, messages)?;
        debug!(
            model = %model,
            wire_model = body.model,
            %attempt,
            max_tokens = body.max_tokens,
            temperature = body.temperature,
            reasoning_effort = ?body.reasoning_effort,
            "sending chat completion"
        );
        let raw = self
            .adapter
            .complete(&body)
            .await
            .map_err(|err| err.into_invocation(model, attempt))?;
        Ok(InvocationOutcome {
            body: raw,
            model,
            attempt,
        })
    }
}
