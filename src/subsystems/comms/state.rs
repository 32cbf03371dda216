//! Shared state for the comms subsystem — capability boundary for channels.
//!
//! Channels receive an `Arc<CommsState>` and are restricted to the typed
//! methods below; the gateway and lookup clients stay private.

use std::sync::Arc;

use crate::subsystems::chat::{ChatError, ChatGateway, ChatReply};
use crate::subsystems::enrichment::{Enricher, LookupError, WeatherReport, WikiSummary};

pub struct CommsState {
    service_name: String,
    gateway: Arc<ChatGateway>,
    enricher: Arc<Enricher>,
}

impl CommsState {
    pub fn new(service_name: impl Into<String>, gateway: Arc<ChatGateway>, enricher: Arc<Enricher>) -> Self {
        Self {
            service_name: service_name.into(),
            gateway,
            enricher,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Route a chat message through enrichment, memory and the completion API.
    pub async fn send_message(
        &self,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatReply, ChatError> {
        self.gateway.handle(message, session_id).await
    }

    /// Direct weather lookup; a missing or blank city means the default city.
    pub async fn weather(&self, city: Option<&str>) -> Result<Option<WeatherReport>, LookupError> {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(self.enricher.default_city());
        self.enricher.lookups().fetch_weather(city).await
    }

    /// Direct encyclopedia lookup.
    pub async fn search_wikipedia(&self, query: &str) -> Result<Option<WikiSummary>, LookupError> {
        self.enricher.lookups().fetch_wikipedia(query).await
    }
}
