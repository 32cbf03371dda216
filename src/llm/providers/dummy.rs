//! Dummy LLM provider — echoes the latest user turn prefixed with `[echo]`.
//! Used to exercise the full chat round-trip without an API key.

use crate::llm::{LlmResponse, ProviderError};
use crate::subsystems::memory::{Role, Turn};

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(
        &self,
        _system: Option<&str>,
        turns: &[Turn],
    ) -> Result<LlmResponse, ProviderError> {
        let last = turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .map(|t| t.content.as_str())
            .unwrap_or_default();
        Ok(LlmResponse {
            text: format!("[echo] {last}"),
            usage: None,
        })
    }
}
