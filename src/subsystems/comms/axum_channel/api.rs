//! Axum handlers for the HTTP API.
//!
//! Error bodies: `400 {error}` for validation, `404 {error}` for lookups
//! that found nothing, `500 {error, details}` for everything else.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::subsystems::chat::ChatError;

use super::AxumState;

const EMPTY_MESSAGE: &str = "Message vide";
const CITY_NOT_FOUND: &str = "Ville non trouvée";
const PAGE_NOT_FOUND: &str = "Pas trouvé sur Wikipedia";
const SERVER_ERROR: &str = "Erreur du serveur";

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(rename = "sessionId", default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
pub(super) struct ChatResponse {
    message: String,
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Deserialize, Default)]
pub(super) struct WeatherRequest {
    #[serde(default)]
    city: Option<String>,
}

#[derive(Deserialize, Default)]
pub(super) struct WikipediaRequest {
    #[serde(default)]
    query: String,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub(super) enum ApiError {
    BadRequest(String),
    NotFound(&'static str),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": reason }))).into_response()
            }
            ApiError::NotFound(reason) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": reason }))).into_response()
            }
            ApiError::Internal(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": SERVER_ERROR, "details": details })),
            )
                .into_response(),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::EmptyMessage => ApiError::BadRequest(EMPTY_MESSAGE.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// A request without a JSON body means "all defaults"; a body that is present
/// but unparseable is rejected.
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(e) => Err(ApiError::BadRequest(e.body_text())),
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /health
pub(super) async fn health(State(state): State<AxumState>) -> Response {
    Json(json!({ "status": "ok", "service": state.comms.service_name() })).into_response()
}

/// POST /api/chat
pub(super) async fn chat(
    State(state): State<AxumState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    match state.comms.send_message(&req.message, req.session_id).await {
        Ok(reply) => Ok(Json(ChatResponse {
            message: reply.message,
            session_id: reply.session_id,
        })),
        Err(ChatError::EmptyMessage) => Err(ApiError::BadRequest(EMPTY_MESSAGE.to_string())),
        Err(e) => {
            error!(error = %e, "chat request failed");
            Err(e.into())
        }
    }
}

/// POST /api/weather
pub(super) async fn weather(
    State(state): State<AxumState>,
    payload: Result<Json<WeatherRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = body_or_default(payload)?;

    match state.comms.weather(req.city.as_deref()).await {
        Ok(Some(report)) => Ok(Json(report).into_response()),
        Ok(None) => Err(ApiError::NotFound(CITY_NOT_FOUND)),
        Err(e) => {
            warn!(error = %e, "weather endpoint failed");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

/// POST /api/search-wikipedia
pub(super) async fn search_wikipedia(
    State(state): State<AxumState>,
    payload: Result<Json<WikipediaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = body_or_default(payload)?;

    match state.comms.search_wikipedia(&req.query).await {
        Ok(Some(summary)) => Ok(Json(summary).into_response()),
        Ok(None) => Err(ApiError::NotFound(PAGE_NOT_FOUND)),
        Err(e) => {
            warn!(error = %e, query = %req.query, "encyclopedia endpoint failed");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}
