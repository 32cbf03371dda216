//! Clients for the public lookup services (Open-Meteo, Wikipedia REST, joke API).
//!
//! Each lookup has a fallible `fetch_*` form returning
//! `Result<Option<_>, LookupError>` (`Ok(None)` = nothing found), used by
//! the direct data endpoints, and a forgiving form that logs and swallows
//! failures, used by chat enrichment.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{EnrichmentConfig, EnrichmentEndpoints};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup request failed: {0}")]
    Http(String),
    #[error("lookup returned HTTP {0}")]
    Status(u16),
    #[error("malformed lookup response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LookupError::Malformed(e.to_string())
        } else {
            LookupError::Http(e.to_string())
        }
    }
}

// ── Public result types ───────────────────────────────────────────────────────

/// Current conditions for a resolved city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Canonical name returned by the geocoder.
    pub city: String,
    /// °C
    pub temperature: f64,
    /// km/h
    pub wind_speed: f64,
    /// WMO weather interpretation code.
    pub weather_code: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikiSummary {
    pub title: String,
    pub extract: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    /// Served whenever the joke API cannot be reached.
    pub fn fallback() -> Self {
        Self {
            setup: "Pourquoi les plongeurs plongent-ils toujours en arrière?".to_string(),
            punchline: "Parce que sinon ils tombent dans le bateau!".to_string(),
        }
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: i64,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    title: String,
    #[serde(default)]
    extract: String,
    content_urls: ContentUrls,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: PageUrl,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: String,
}

// ── LookupClient ──────────────────────────────────────────────────────────────

/// Shared client for all lookups. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LookupClient {
    client: Client,
    endpoints: EnrichmentEndpoints,
    language: String,
}

impl LookupClient {
    pub fn new(config: &EnrichmentConfig) -> Result<Self, LookupError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LookupError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            language: config.language.clone(),
        })
    }

    /// Geocode `city`, then fetch its current conditions.
    /// `Ok(None)` when the geocoder knows no such place.
    pub async fn fetch_weather(&self, city: &str) -> Result<Option<WeatherReport>, LookupError> {
        debug!(%city, "geocoding city");
        let geo: GeocodingResponse = self
            .client
            .get(&self.endpoints.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?;

        let Some(place) = geo.results.into_iter().next() else {
            debug!(%city, "geocoder returned no match");
            return Ok(None);
        };

        debug!(city = %place.name, lat = place.latitude, lon = place.longitude, "fetching forecast");
        let forecast: ForecastResponse = self
            .client
            .get(&self.endpoints.forecast_url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?;

        Ok(Some(WeatherReport {
            city: place.name,
            temperature: forecast.current_weather.temperature,
            wind_speed: forecast.current_weather.windspeed,
            weather_code: forecast.current_weather.weathercode,
        }))
    }

    /// Page summary for `subject`. `Ok(None)` when the page does not exist.
    pub async fn fetch_wikipedia(&self, subject: &str) -> Result<Option<WikiSummary>, LookupError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Ok(None);
        }

        let url = format!(
            "{}/{}",
            self.endpoints.wikipedia_url.trim_end_matches('/'),
            urlencoding::encode(subject)
        );
        debug!(%subject, "fetching encyclopedia summary");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let summary: SummaryResponse = response.error_for_status().map_err(status_error)?.json().await?;

        Ok(Some(WikiSummary {
            title: summary.title,
            extract: summary.extract,
            url: summary.content_urls.desktop.page,
        }))
    }

    pub async fn fetch_joke(&self) -> Result<Joke, LookupError> {
        debug!("fetching random joke");
        let joke = self
            .client
            .get(&self.endpoints.joke_url)
            .send()
            .await?
            .error_for_status()
            .map_err(status_error)?
            .json()
            .await?;
        Ok(joke)
    }

    // ── Forgiving forms ───────────────────────────────────────────────────

    pub async fn weather(&self, city: &str) -> Option<WeatherReport> {
        self.fetch_weather(city).await.unwrap_or_else(|e| {
            warn!(%city, error = %e, "weather lookup failed");
            None
        })
    }

    pub async fn wikipedia(&self, subject: &str) -> Option<WikiSummary> {
        self.fetch_wikipedia(subject).await.unwrap_or_else(|e| {
            warn!(%subject, error = %e, "encyclopedia lookup failed");
            None
        })
    }

    /// Never empty: falls back to [`Joke::fallback`].
    pub async fn joke(&self) -> Joke {
        self.fetch_joke().await.unwrap_or_else(|e| {
            warn!(error = %e, "joke lookup failed — using fallback");
            Joke::fallback()
        })
    }
}

fn status_error(e: reqwest::Error) -> LookupError {
    match e.status() {
        Some(status) => LookupError::Status(status.as_u16()),
        None => LookupError::Http(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{defaults, EnvOverrides};
    use mockito::Matcher;
    use serde_json::json;

    fn client(base: &str) -> LookupClient {
        let mut cfg = defaults(&EnvOverrides::default()).unwrap().enrichment;
        cfg.endpoints = EnrichmentEndpoints {
            geocoding_url: format!("{base}/v1/search"),
            forecast_url: format!("{base}/v1/forecast"),
            wikipedia_url: format!("{base}/api/rest_v1/page/summary"),
            joke_url: format!("{base}/random_joke"),
        };
        cfg.timeout_seconds = Some(5);
        LookupClient::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn weather_geocodes_then_reads_current_conditions() {
        let mut server = mockito::Server::new_async().await;
        let geo = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "Lyon".into()),
                Matcher::UrlEncoded("count".into(), "1".into()),
                Matcher::UrlEncoded("language".into(), "fr".into()),
            ]))
            .with_body(json!({"results": [{"name": "Lyon", "latitude": 45.75, "longitude": 4.85}]}).to_string())
            .create_async()
            .await;
        let forecast = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("latitude".into(), "45.75".into()),
                Matcher::UrlEncoded("longitude".into(), "4.85".into()),
                Matcher::UrlEncoded("current_weather".into(), "true".into()),
            ]))
            .with_body(
                json!({"current_weather": {"temperature": 18.3, "windspeed": 12.0, "weathercode": 3}})
                    .to_string(),
            )
            .create_async()
            .await;

        let report = client(&server.url()).fetch_weather("Lyon").await.unwrap().unwrap();
        assert_eq!(
            report,
            WeatherReport { city: "Lyon".into(), temperature: 18.3, wind_speed: 12.0, weather_code: 3 }
        );
        geo.assert_async().await;
        forecast.assert_async().await;
    }

    #[tokio::test]
    async fn unknown_city_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _geo = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_body(r#"{"generationtime_ms": 0.5}"#)
            .create_async()
            .await;

        let c = client(&server.url());
        assert_eq!(c.fetch_weather("Atlantide").await.unwrap(), None);
        assert_eq!(c.weather("Atlantide").await, None);
    }

    #[tokio::test]
    async fn malformed_forecast_is_error_but_swallowed_by_weather() {
        let mut server = mockito::Server::new_async().await;
        let _geo = server
            .mock("GET", "/v1/search")
            .match_query(Matcher::Any)
            .with_body(json!({"results": [{"name": "Nice", "latitude": 43.7, "longitude": 7.26}]}).to_string())
            .create_async()
            .await;
        let _forecast = server
            .mock("GET", "/v1/forecast")
            .match_query(Matcher::Any)
            .with_body(r#"{"hourly": {}}"#)
            .create_async()
            .await;

        let c = client(&server.url());
        assert!(matches!(c.fetch_weather("Nice").await, Err(LookupError::Malformed(_))));
        assert_eq!(c.weather("Nice").await, None);
    }

    #[tokio::test]
    async fn wikipedia_summary_is_read_and_subject_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/rest_v1/page/summary/Marie%20Curie")
            .with_body(
                json!({
                    "title": "Marie Curie",
                    "extract": "Physicienne et chimiste.",
                    "content_urls": {"desktop": {"page": "https://fr.wikipedia.org/wiki/Marie_Curie"}}
                })
                .to_string(),
            )
            .create_async()
            .await;

        let summary = client(&server.url()).fetch_wikipedia("Marie Curie").await.unwrap().unwrap();
        assert_eq!(summary.title, "Marie Curie");
        assert_eq!(summary.url, "https://fr.wikipedia.org/wiki/Marie_Curie");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn wikipedia_not_found_and_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/api/rest_v1/page/summary/Nobody")
            .with_status(404)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/api/rest_v1/page/summary/Broken")
            .with_status(503)
            .create_async()
            .await;

        let c = client(&server.url());
        assert_eq!(c.fetch_wikipedia("Nobody").await.unwrap(), None);
        assert!(matches!(c.fetch_wikipedia("Broken").await, Err(LookupError::Status(503))));
        assert_eq!(c.wikipedia("Broken").await, None);
    }

    #[tokio::test]
    async fn empty_subject_makes_no_call() {
        let server = mockito::Server::new_async().await;
        assert_eq!(client(&server.url()).fetch_wikipedia("   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn joke_is_fetched() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random_joke")
            .with_body(json!({"id": 1, "type": "general", "setup": "S?", "punchline": "P!"}).to_string())
            .create_async()
            .await;

        let joke = client(&server.url()).joke().await;
        assert_eq!(joke, Joke { setup: "S?".into(), punchline: "P!".into() });
    }

    #[tokio::test]
    async fn joke_falls_back_on_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/random_joke").with_status(500).create_async().await;

        assert_eq!(client(&server.url()).joke().await, Joke::fallback());
    }
}
