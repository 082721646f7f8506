use crate::detection::DetectedObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnalyzeFrameRequest {
    #[serde(default)]
    pub frame: Option<String>,
}

/// Objects exactly as the model reported them.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeFrameResponse {
    pub objects: Vec<Value>,
}

/// Client-side view of [`AnalyzeFrameResponse`].
#[derive(Debug, Deserialize)]
pub struct AnalyzeFrameResult {
    #[serde(default)]
    pub objects: Option<Vec<DetectedObject>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detected_objects: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub ready: bool,
}
