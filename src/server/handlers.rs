use super::types::{
    AnalyzeFrameRequest, AnalyzeFrameResponse, ChatRequest, ChatResponse, ErrorResponse,
    HealthResponse, StatusResponse,
};
use crate::{
    Error,
    service::{ChatResponder, FrameAnalyzer},
};
use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<FrameAnalyzer>,
    pub responder: Arc<ChatResponder>,
    pub credential_configured: bool,
}

pub async fn analyze_frame(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeFrameResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let request: AnalyzeFrameRequest = parse_body(request_id, "analyze-frame", &body)?;

    info!(%request_id, "Received frame analysis request");

    match state.analyzer.analyze(request.frame.as_deref()).await {
        Ok(objects) => Ok(Json(AnalyzeFrameResponse { objects })),
        Err(e) => Err(failure(request_id, "analyze-frame", e)),
    }
}

pub async fn chat_with_context(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let request: ChatRequest = parse_body(request_id, "chat-with-context", &body)?;

    info!(
        %request_id,
        "Received chat request with {} detected objects",
        request.detected_objects.len()
    );

    match state
        .responder
        .respond(request.message.as_deref(), &request.detected_objects)
        .await
    {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) => Err(failure(request_id, "chat-with-context", e)),
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: "omnivision",
        version: env!("CARGO_PKG_VERSION"),
        ready: state.credential_configured,
    })
}

/// Bodies are read as JSON whatever their `Content-Type`.
fn parse_body<T: DeserializeOwned>(
    request_id: Uuid,
    function: &str,
    body: &[u8],
) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| failure(request_id, function, Error::InvalidRequest(e.to_string())))
}

/// Every failure leaves the service as a 500 with an `{error}` body.
fn failure(request_id: Uuid, function: &str, e: Error) -> ApiError {
    error!(
        %request_id,
        upstream = e.is_upstream(),
        "Error in {}: {}",
        function,
        e
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
