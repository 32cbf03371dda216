//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Providers are stateless and cheap to clone; the conversation window is
//! assembled by the chat gateway and passed in on every call.

pub mod providers;

use thiserror::Error;

use crate::subsystems::memory::Turn;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider '{0}' requires an API key (set LLM_API_KEY)")]
    MissingApiKey(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub usage: Option<LlmUsage>,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Anthropic(providers::anthropic::AnthropicProvider),
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
}

impl LlmProvider {
    /// Send `turns` (oldest first, last one from the user) with an optional
    /// system prompt and return the assistant's reply.
    pub async fn complete(
        &self,
        system: Option<&str>,
        turns: &[Turn],
    ) -> Result<LlmResponse, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(system, turns).await,
            LlmProvider::Anthropic(p) => p.complete(system, turns).await,
            LlmProvider::OpenAiCompatible(p) => p.complete(system, turns).await,
        }
    }

    /// Short provider name for logs and the startup banner.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::Anthropic(_) => "anthropic",
            LlmProvider::OpenAiCompatible(_) => "openai",
        }
    }
}
