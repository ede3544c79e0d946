use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigurationError;
use crate::helpers::{lookup_opt, lookup_parse};
use crate::inference::Profile;

/// OpenAI-compatible endpoints the router knows how to reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
    Together,
}

impl Provider {
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::Together => "https://api.together.xyz/v1",
        }
    }

    pub const fn base_url_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_BASE_URL",
            Provider::Together => "TOGETHER_BASE_URL",
        }
    }

    pub const fn api_key_var(self) -> &'static str {
        match self {
            Provider::OpenRouter => "OPENROUTER_API_KEY",
            Provider::Together => "TOGETHER_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenRouter => write!(f, "openrouter"),
            Provider::Together => write!(f, "together"),
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigurationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Ok(Provider::OpenRouter),
            "together" => Ok(Provider::Together),
            _ => Err(ConfigurationError::UnknownProvider(raw.trim().to_string())),
        }
    }
}

#[derive(Clone)]
pub struct InferenceConfig {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
    pub profile: Profile,
    /// JSON task table that overrides `profile` when set.
    pub agent_config_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    pub port: u16,
}

impl InferenceConfig {
    pub fn new(provider: Provider, api_key: &str) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            api_key: api_key.to_string(),
            profile: Profile::Default,
            agent_config_path: None,
            request_timeout_secs: 120,
            port: 8080,
        }
    }

    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source (the process environment
    /// in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup_opt(&lookup, "INFER_PROVIDER") {
            Some(raw) => raw.parse::<Provider>()?,
            None => Provider::OpenRouter,
        };
        let api_key = lookup_opt(&lookup, provider.api_key_var())
            .ok_or_else(|| ConfigurationError::MissingSetting(provider.api_key_var().to_string()))?;

        let mut cfg = Self::new(provider, &api_key);
        if let Some(base_url) = lookup_opt(&lookup, provider.base_url_var()) {
            cfg.base_url = base_url;
        }
        if let Some(profile) = lookup_opt(&lookup, "INFER_PROFILE") {
            cfg.profile = profile.parse()?;
        }
        cfg.agent_config_path = lookup_opt(&lookup, "INFER_AGENT_CONFIG").map(PathBuf::from);
        cfg.request_timeout_secs = lookup_parse(&lookup, "INFER_TIMEOUT_SECS", cfg.request_timeout_secs)?;
        if cfg.request_timeout_secs == 0 {
            return Err(ConfigurationError::InvalidSetting {
                key: "INFER_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
            });
        }
        cfg.port = lookup_parse(&lookup, "PORT", cfg.port)?;
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("profile", &self.profile)
            .field("agent_config_path", &self.agent_config_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_openrouter() {
        let cfg = InferenceConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "sk-or-test")])).unwrap();
        assert_eq!(cfg.provider, Provider::OpenRouter);
        assert_eq!(cfg.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(cfg.profile, Profile::Default);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(120));
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn together_reads_its_own_variables() {
        let cfg = InferenceConfig::from_lookup(lookup(&[
            ("INFER_PROVIDER", "together"),
            ("TOGETHER_API_KEY", "tg-key"),
            ("TOGETHER_BASE_URL", "http://localhost:9999/v1"),
            ("INFER_PROFILE", "premium"),
            ("INFER_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(cfg.provider, Provider::Together);
        assert_eq!(cfg.api_key, "tg-key");
        assert_eq!(cfg.base_url, "http://localhost:9999/v1");
        assert_eq!(cfg.profile, Profile::Premium);
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn missing_api_key_is_reported_by_name() {
        let err = InferenceConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigurationError::MissingSetting("OPENROUTER_API_KEY".to_string()));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let err = InferenceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "k"),
            ("INFER_PROFILE", "gold"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownProfile("gold".to_string()));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = InferenceConfig::from_lookup(lookup(&[
            ("INFER_PROVIDER", " Anthropic "),
            ("OPENROUTER_API_KEY", "k"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownProvider("Anthropic".to_string()));
        assert_eq!(err.to_string(), "unknown provider: Anthropic");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = InferenceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "k"),
            ("INFER_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidSetting {
                key: "INFER_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
            }
        );
    }

    #[test]
    fn unparsable_numbers_are_rejected_not_defaulted() {
        let err = InferenceConfig::from_lookup(lookup(&[
            ("OPENROUTER_API_KEY", "k"),
            ("INFER_TIMEOUT_SECS", "abc"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { ref key, ref value }
            if key == "INFER_TIMEOUT_SECS" && value == "abc"));

        let err = InferenceConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "k"), ("PORT", "x")])).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { ref key, .. } if key == "PORT"));

        let err = InferenceConfig::from_lookup(lookup(&[("OPENROUTER_API_KEY", "k"), ("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let cfg = InferenceConfig::new(Provider::OpenRouter, "sk-or-secret");
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("sk-or-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
