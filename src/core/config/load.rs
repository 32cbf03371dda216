//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies `PORT`, `OMNIBOT_LOG_LEVEL` and API-key env overrides.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Deep-merge two TOML values.
/// Tables merge recursively; any other overlay value replaces the base.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file and follow its `[meta] base` chain.
/// `visited` holds canonical paths already seen so cycles are rejected.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let overlay: toml::Value = toml::from_str(&text)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let base = overlay
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
        .map(|b| {
            if Path::new(b).is_absolute() {
                PathBuf::from(b)
            } else {
                path.parent().unwrap_or(Path::new(".")).join(b)
            }
        });

    match base {
        Some(base_path) => Ok(merge_toml(load_raw_merged(&base_path, visited)?, overlay)),
        None => Ok(overlay),
    }
}

/// Load config from `config_path`, or `config/default.toml`, then apply env
/// overrides. Without an explicit path and without the default file, the
/// built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = EnvOverrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        resolve(RawConfig::default(), &overrides)
    }
}

/// Load from an explicit path with explicit overrides.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let merged = load_raw_merged(path, &mut HashSet::new())?;
    let parsed: RawConfig = Deserialize::deserialize(merged).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;
    resolve(parsed, overrides)
}

/// Built-in defaults with the given overrides applied.
pub fn defaults(overrides: &EnvOverrides) -> Result<Config, AppError> {
    resolve(RawConfig::default(), overrides)
}

fn resolve(parsed: RawConfig, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let bind = match overrides.port.as_deref() {
        Some(port) => apply_port(&parsed.server.bind, port)?,
        None => parsed.server.bind,
    };
    let log_level = overrides
        .log_level
        .clone()
        .unwrap_or(parsed.server.log_level);

    if parsed.chat.context_window == 0 {
        return Err(AppError::Config("chat.context_window must be at least 1".into()));
    }

    let positive = |secs: u64| (secs > 0).then_some(secs);

    Ok(Config {
        server: ServerConfig {
            name: parsed.server.name,
            bind,
        },
        log_level,
        llm: LlmConfig {
            provider: parsed.llm.provider,
            anthropic: AnthropicConfig {
                api_base_url: parsed.llm.anthropic.api_base_url,
                model: parsed.llm.anthropic.model,
                api_version: parsed.llm.anthropic.api_version,
                max_tokens: parsed.llm.anthropic.max_tokens,
                timeout_seconds: positive(parsed.llm.anthropic.timeout_seconds),
            },
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                max_tokens: parsed.llm.openai.max_tokens,
                timeout_seconds: positive(parsed.llm.openai.timeout_seconds),
            },
        },
        llm_api_key: overrides.api_key.clone(),
        chat: ChatConfig {
            context_window: parsed.chat.context_window,
            system_prompt: parsed.chat.system_prompt,
            default_session_id: parsed.chat.default_session_id,
            max_sessions: (parsed.chat.max_sessions > 0).then_some(parsed.chat.max_sessions),
        },
        enrichment: EnrichmentConfig {
            default_city: parsed.enrichment.default_city,
            language: parsed.enrichment.language,
            extract_chars: parsed.enrichment.extract_chars,
            timeout_seconds: positive(parsed.enrichment.timeout_seconds),
            endpoints: EnrichmentEndpoints {
                geocoding_url: parsed.enrichment.endpoints.geocoding_url,
                forecast_url: parsed.enrichment.endpoints.forecast_url,
                wikipedia_url: parsed.enrichment.endpoints.wikipedia_url,
                joke_url: parsed.enrichment.endpoints.joke_url,
            },
        },
    })
}

/// Replace the port of a `host:port` bind address.
fn apply_port(bind: &str, port: &str) -> Result<String, AppError> {
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("invalid PORT value: '{port}'")))?;
    let host = bind.rsplit_once(':').map(|(host, _)| host).unwrap_or(bind);
    Ok(format!("{host}:{port}"))
}
