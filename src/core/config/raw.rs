//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so an
//! empty file (or no file at all) resolves to a working configuration.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape — serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub llm: RawLlm,
    #[serde(default)]
    pub chat: RawChat,
    #[serde(default)]
    pub enrichment: RawEnrichment,
}

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_server_name")]
    pub name: String,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            bind: default_bind(),
            log_level: default_log_level(),
        }
    }
}

// ── LLM ─────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLlm {
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub anthropic: RawAnthropicConfig,
    #[serde(default)]
    pub openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            anthropic: RawAnthropicConfig::default(),
            openai: RawOpenAiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawAnthropicConfig {
    #[serde(default = "default_anthropic_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    #[serde(default = "default_anthropic_api_version")]
    pub api_version: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// 0 leaves the transport default in place.
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl Default for RawAnthropicConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_anthropic_api_base_url(),
            model: default_anthropic_model(),
            api_version: default_anthropic_api_version(),
            max_tokens: default_max_tokens(),
            timeout_seconds: 0,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: 0,
        }
    }
}

// ── Chat ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawChat {
    #[serde(default = "default_context_window")]
    pub context_window: usize,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_session_id")]
    pub default_session_id: String,
    /// 0 = unbounded.
    #[serde(default)]
    pub max_sessions: usize,
}

impl Default for RawChat {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            system_prompt: default_system_prompt(),
            default_session_id: default_session_id(),
            max_sessions: 0,
        }
    }
}

// ── Enrichment ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawEnrichment {
    #[serde(default = "default_city")]
    pub default_city: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_extract_chars")]
    pub extract_chars: usize,
    #[serde(default)]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub endpoints: RawEndpoints,
}

impl Default for RawEnrichment {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            language: default_language(),
            extract_chars: default_extract_chars(),
            timeout_seconds: 0,
            endpoints: RawEndpoints::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawEndpoints {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_wikipedia_url")]
    pub wikipedia_url: String,
    #[serde(default = "default_joke_url")]
    pub joke_url: String,
}

impl Default for RawEndpoints {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            wikipedia_url: default_wikipedia_url(),
            joke_url: default_joke_url(),
        }
    }
}

// ── Defaults ────────────────────────────────────────────────────────────────

fn default_server_name() -> String { "omniscient-bot".to_string() }
pub(super) fn default_bind() -> String { "127.0.0.1:3000".to_string() }
fn default_log_level() -> String { "info".to_string() }

fn default_llm_provider() -> String { "anthropic".to_string() }
fn default_anthropic_api_base_url() -> String { "https://api.anthropic.com/v1/messages".to_string() }
fn default_anthropic_model() -> String { "claude-opus-4-1-20250805".to_string() }
fn default_anthropic_api_version() -> String { "2023-06-01".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_openai_temperature() -> f32 { 0.2 }
fn default_max_tokens() -> u32 { 1024 }

pub(super) fn default_context_window() -> usize { 10 }
pub(super) fn default_session_id() -> String { "default".to_string() }
pub(super) fn default_system_prompt() -> String {
    "Tu es un assistant IA ultra-intelligent qui a réponse à TOUT.
- Réponds avec des FAITS RÉELS (utilise les données fournies)
- Sois concis, utile et amical
- Si tu as des données réelles, utilise-les en priorité
- Utilise des emojis pour rendre tes réponses plus agréables
- Sois toujours honnête et admets ce que tu ne sais pas"
        .to_string()
}

pub(super) fn default_city() -> String { "Paris".to_string() }
pub(super) fn default_language() -> String { "fr".to_string() }
pub(super) fn default_extract_chars() -> usize { 500 }
pub(super) fn default_geocoding_url() -> String { "https://geocoding-api.open-meteo.com/v1/search".to_string() }
pub(super) fn default_forecast_url() -> String { "https://api.open-meteo.com/v1/forecast".to_string() }
pub(super) fn default_wikipedia_url() -> String { "https://fr.wikipedia.org/api/rest_v1/page/summary".to_string() }
pub(super) fn default_joke_url() -> String { "https://official-joke-api.appspot.com/random_joke".to_string() }
