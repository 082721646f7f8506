use super::VisionService;
use crate::{
    Error, Result,
    config::CaptureConfig,
    detection::DetectedObject,
    frame::Frame,
    server::types::{
        AnalyzeFrameRequest, AnalyzeFrameResult, ChatRequest, ChatResponse, ErrorResponse,
    },
};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// Talks to the analysis and chat endpoints over HTTP.
pub struct HttpVisionService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpVisionService {
    pub fn new(config: &CaptureConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.service_url.trim_end_matches('/').to_string(),
        })
    }

    async fn invoke<B, R>(&self, function: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, function);
        debug!("Invoking {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(envelope) => envelope.error,
                Err(_) => format!(
                    "{} returned {}: {}",
                    function,
                    status,
                    String::from_utf8_lossy(&bytes)
                ),
            };
            return Err(Error::service(message));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl VisionService for HttpVisionService {
    async fn analyze_frame(&self, frame: &Frame) -> Result<Vec<DetectedObject>> {
        let request = AnalyzeFrameRequest {
            frame: Some(frame.to_data_uri()),
        };

        let result: AnalyzeFrameResult = self.invoke("analyze-frame", &request).await?;
        result
            .objects
            .ok_or_else(|| Error::service("analyze-frame response did not include objects"))
    }

    async fn chat(&self, message: &str, detected_objects: &[String]) -> Result<String> {
        let request = ChatRequest {
            message: Some(message.to_string()),
            detected_objects: detected_objects.to_vec(),
        };

        let response: ChatResponse = self.invoke("chat-with-context", &request).await?;
        Ok(response.response)
    }
}
