use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::agent::Agent;
use crate::config::InferenceConfig;
use crate::error::ConfigurationError;
use crate::inference::{AgentConfig, ConfigResolver};
use crate::llm::{InvocationClient, OpenAiCompatAdapter, OpenAiCompatConfig};

pub fn lookup_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Parsed value for `key`, or `fallback` when unset. A value that is set but
/// does not parse is an error.
pub fn lookup_parse<F, T>(lookup: &F, key: &str, fallback: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup_opt(lookup, key) {
        Some(raw) => raw.parse::<T>().map_err(|_| ConfigurationError::InvalidSetting {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(fallback),
    }
}

pub fn build_resolver(cfg: &InferenceConfig) -> Result<ConfigResolver, ConfigurationError> {
    match &cfg.agent_config_path {
        Some(path) => {
            let table = AgentConfig::load(path)?;
            info!(path = %path.display(), "loaded custom agent config");
            ConfigResolver::new(table)
        }
        None => Ok(ConfigResolver::from_profile(cfg.profile)),
    }
}

pub fn build_invocation_client(cfg: &InferenceConfig) -> Result<InvocationClient, ConfigurationError> {
    let adapter = OpenAiCompatAdapter::new(OpenAiCompatConfig {
        base_url: cfg.base_url.clone(),
        api_key: cfg.api_key.clone(),
        timeout: cfg.request_timeout(),
    })?;
    Ok(InvocationClient::new(Arc::new(adapter)).with_provider(cfg.provider))
}

pub fn build_agent(name: &str, cfg: &InferenceConfig) -> Result<Agent, ConfigurationError> {
    let resolver = build_resolver(cfg)?;
    let client = build_invocation_client(cfg)?;
    client.check_table(&resolver.snapshot())?;
    info!(
        provider = %cfg.provider,
        base_url = %cfg.base_url,
        table = %resolver.source(),
        "inference agent ready"
    );
    Ok(Agent::new(name, resolver, client))
}

/// Installs the global subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
