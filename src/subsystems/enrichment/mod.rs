//! Enrichment — appends real-world data to a chat message before it goes to
//! the model.
//!
//! - **triggers** — keyword detection and city/subject extraction.
//! - **lookups** — HTTP clients for the weather, encyclopedia and joke services.
//!
//! Weather and encyclopedia failures degrade to "no fragment"; the joke
//! lookup always yields one (remote joke or the built-in fallback).

pub mod lookups;
pub mod triggers;

use tracing::debug;

use crate::config::EnrichmentConfig;

pub use lookups::{Joke, LookupClient, LookupError, WeatherReport, WikiSummary};
pub use triggers::Triggers;

pub struct Enricher {
    lookups: LookupClient,
    default_city: String,
    extract_chars: usize,
}

impl Enricher {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, LookupError> {
        Ok(Self {
            lookups: LookupClient::new(config)?,
            default_city: config.default_city.clone(),
            extract_chars: config.extract_chars,
        })
    }

    pub fn lookups(&self) -> &LookupClient {
        &self.lookups
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Fragments for every trigger in `message`, in weather, encyclopedia,
    /// joke order. Lookups run one after another.
    pub async fn fragments(&self, message: &str) -> Vec<String> {
        let triggers = triggers::detect(message);
        let mut out = Vec::new();
        if !triggers.any() {
            return out;
        }
        debug!(?triggers, "enrichment triggered");

        if triggers.weather {
            let city = triggers::extract_city(message).unwrap_or_else(|| self.default_city.clone());
            if let Some(report) = self.lookups.weather(&city).await {
                out.push(weather_fragment(&report));
            }
        }

        if triggers.encyclopedia {
            let subject = triggers::extract_subject(message);
            if let Some(summary) = self.lookups.wikipedia(&subject).await {
                out.push(wiki_fragment(&summary, self.extract_chars));
            }
        }

        if triggers.joke {
            out.push(joke_fragment(&self.lookups.joke().await));
        }

        out
    }

    /// All fragments concatenated; empty when nothing fired or everything failed.
    pub async fn context(&self, message: &str) -> String {
        self.fragments(message).await.concat()
    }
}

pub fn weather_fragment(report: &WeatherReport) -> String {
    format!(
        "\n[DONNÉES MÉTÉO RÉELLES pour {}: {}°C, vent {}km/h]",
        report.city, report.temperature, report.wind_speed
    )
}

/// `budget` counts characters, not bytes.
pub fn wiki_fragment(summary: &WikiSummary, budget: usize) -> String {
    let extract: String = summary.extract.chars().take(budget).collect();
    format!(
        "\n[DONNÉES WIKIPEDIA sur {}:\n{}...\nSource: {}]",
        summary.title, extract, summary.url
    )
}

pub fn joke_fragment(joke: &Joke) -> String {
    format!("\n[BLAGUE: {} - {}]", joke.setup, joke.punchline)
}
