//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory — called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod anthropic;
pub mod dummy;
pub mod openai_compatible;

use std::time::Duration;

use reqwest::Client;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` comes from the environment, never from TOML. Hosted providers
/// refuse to start without one.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "anthropic" => {
            let key = api_key.ok_or_else(|| ProviderError::MissingApiKey("anthropic".into()))?;
            let p = anthropic::AnthropicProvider::new(config.anthropic.clone(), key)?;
            Ok(LlmProvider::Anthropic(p))
        }
        "openai" | "openai-compatible" => {
            let p = openai_compatible::OpenAiCompatibleProvider::new(config.openai.clone(), api_key)?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

/// Shared HTTP client construction; `None` keeps reqwest's defaults.
pub(crate) fn http_client(timeout_seconds: Option<u64>) -> Result<Client, ProviderError> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{defaults, EnvOverrides};

    fn llm_config(provider: &str) -> LlmConfig {
        let mut cfg = defaults(&EnvOverrides::default()).unwrap().llm;
        cfg.provider = provider.into();
        cfg
    }

    #[test]
    fn builds_dummy_without_key() {
        let p = build(&llm_config("dummy"), None).unwrap();
        assert_eq!(p.name(), "dummy");
    }

    #[test]
    fn anthropic_requires_key() {
        let err = build(&llm_config("anthropic"), None).unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey(_)));
        let p = build(&llm_config("anthropic"), Some("sk-ant".into())).unwrap();
        assert_eq!(p.name(), "anthropic");
    }

    #[test]
    fn openai_accepts_keyless_local_models() {
        let p = build(&llm_config("openai-compatible"), None).unwrap();
        assert_eq!(p.name(), "openai");
    }

    #[test]
    fn unknown_provider_errors() {
        let err = build(&llm_config("parrot"), None).unwrap_err();
        assert!(err.to_string().contains("parrot"));
    }
}
