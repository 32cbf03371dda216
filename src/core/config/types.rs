//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the server consumes.
//! Raw TOML deserialization types live in `raw.rs`.

// ── Server ──────────────────────────────────────────────────────────────────

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Service name reported by `GET /health`.
    pub name: String,
    /// Socket address to bind, after the `PORT` override is applied.
    pub bind: String,
}

// ── LLM ─────────────────────────────────────────────────────────────────────

/// Anthropic Messages API provider configuration (`[llm.anthropic]`).
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// Full messages endpoint URL.
    pub api_base_url: String,
    pub model: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    pub max_tokens: u32,
    /// `None` leaves the HTTP client without a timeout.
    pub timeout_seconds: Option<u64>,
}

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: Option<u64>,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"anthropic"`, `"openai"`, `"dummy"`).
    pub provider: String,
    pub anthropic: AnthropicConfig,
    pub openai: OpenAiConfig,
}

// ── Chat ────────────────────────────────────────────────────────────────────

/// Chat gateway behaviour (`[chat]`).
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Number of trailing turns sent to the completion API.
    pub context_window: usize,
    pub system_prompt: String,
    /// Session used when the request carries no `sessionId`.
    pub default_session_id: String,
    /// Least-recently-used eviction threshold; `None` keeps every session.
    pub max_sessions: Option<usize>,
}

// ── Enrichment ──────────────────────────────────────────────────────────────

/// Base URLs of the public lookup services.
#[derive(Debug, Clone)]
pub struct EnrichmentEndpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Summary endpoint; the subject is appended as a path segment.
    pub wikipedia_url: String,
    pub joke_url: String,
}

/// Enrichment lookup configuration (`[enrichment]`).
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// City used when a weather question names none.
    pub default_city: String,
    /// Language passed to the geocoder.
    pub language: String,
    /// Character budget for encyclopedia extracts.
    pub extract_chars: usize,
    pub timeout_seconds: Option<u64>,
    pub endpoints: EnrichmentEndpoints,
}

// ── Top-level ───────────────────────────────────────────────────────────────

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub log_level: String,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` (or `ANTHROPIC_API_KEY`). Never sourced from TOML.
    pub llm_api_key: Option<String>,
    pub chat: ChatConfig,
    pub enrichment: EnrichmentConfig,
}

/// Environment-sourced overrides, gathered once by [`super::load`].
/// Tests build this directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `PORT` — replaces the port of `server.bind`.
    pub port: Option<String>,
    /// `OMNIBOT_LOG_LEVEL`.
    pub log_level: Option<String>,
    /// `LLM_API_KEY`, falling back to `ANTHROPIC_API_KEY`.
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            port: non_empty("PORT"),
            log_level: non_empty("OMNIBOT_LOG_LEVEL"),
            api_key: non_empty("LLM_API_KEY").or_else(|| non_empty("ANTHROPIC_API_KEY")),
        }
    }
}
