//! Anthropic Messages API provider (`/v1/messages`).
//!
//! Sends the system prompt plus the conversation window in one round-trip.
//! All wire types are private to this module.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::config::AnthropicConfig;
use crate::llm::{LlmResponse, LlmUsage, ProviderError};
use crate::subsystems::memory::Turn;

/// Client for the Anthropic Messages endpoint.
///
/// Constructed once at startup and cloned freely (`reqwest::Client` is an
/// `Arc` internally).
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: Client,
    config: AnthropicConfig,
    api_key: String,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = super::http_client(config.timeout_seconds)?;
        Ok(Self { client, config, api_key })
    }

    pub async fn complete(
        &self,
        system: Option<&str>,
        turns: &[Turn],
    ) -> Result<LlmResponse, ProviderError> {
        let payload = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: turns
                .iter()
                .map(|t| Message { role: t.role.as_str(), content: &t.content })
                .collect(),
        };

        debug!(
            model = %payload.model,
            max_tokens = payload.max_tokens,
            turns = payload.messages.len(),
            "sending Anthropic request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Anthropic request payload");
        }

        let response = self
            .client
            .post(&self.config.api_base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.config.api_base_url, error = %e, "Anthropic request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let parsed = response.json::<MessagesResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize Anthropic response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(blocks = parsed.content.len(), "received Anthropic response");

        let text = parsed
            .content
            .into_iter()
            .find(|b| b.kind == "text")
            .and_then(|b| b.text)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ProviderError::Request("no text content in response".into()))?;

        let usage = parsed.usage.map(|u| LlmUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        });

        Ok(LlmResponse { text, usage })
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    message: String,
}

/// Pass successful responses through; turn anything else into a
/// `ProviderError` carrying the API's own error message when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(env) => match env.error.kind {
            Some(kind) => format!("HTTP {status} [{kind}]: {}", env.error.message),
            None => format!("HTTP {status}: {}", env.error.message),
        },
        Err(_) => format!("HTTP {status}: {body}"),
    };

    error!(%status, %message, "Anthropic request returned HTTP error");
    Err(ProviderError::Request(message))
}
