use super::require_credential;
use crate::{
    Error, Result,
    detection::extract_objects,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

pub const DETECTION_PROMPT: &str = "Analyze this image and identify all visible objects. \
Return a JSON array of objects with \"name\" and \"confidence\" (0-1) fields. \
Be concise and only list distinct, recognizable objects. \
Example: [{\"name\":\"laptop\",\"confidence\":0.95},{\"name\":\"coffee mug\",\"confidence\":0.87}]";

pub const DETECTION_TEMPERATURE: f32 = 0.3;

/// Forwards frames to the vision model and turns its answer into an
/// object list.
pub struct FrameAnalyzer {
    llm: Arc<dyn LlmClient>,
    api_key: Option<String>,
}

impl FrameAnalyzer {
    pub fn new(llm: Arc<dyn LlmClient>, api_key: Option<String>) -> Self {
        Self { llm, api_key }
    }

    /// Only a missing frame, a missing credential or a failed upstream call
    /// is an error. An answer that cannot be parsed yields no objects.
    pub async fn analyze(&self, frame: Option<&str>) -> Result<Vec<Value>> {
        let frame = frame
            .filter(|frame| !frame.is_empty())
            .ok_or(Error::MissingFrame)?;
        let api_key = require_credential(self.api_key.as_deref())?;

        debug!(
            header = frame_header(frame),
            chars = frame.len(),
            "Analyzing frame"
        );

        let request = ChatCompletionRequest {
            messages: vec![ChatMessage::user_with_image(DETECTION_PROMPT, frame)],
            temperature: Some(DETECTION_TEMPERATURE),
        };

        let response = self.llm.create_chat_completion(api_key, request).await?;
        let content = response.first_content().unwrap_or("[]");

        let objects = extract_objects(content);
        info!("Detected {} objects", objects.len());

        Ok(objects)
    }
}

/// The part of a data URI before the payload, e.g. `data:image/jpeg;base64`.
/// Frames are forwarded undecoded.
fn frame_header(frame: &str) -> &str {
    frame
        .split_once(',')
        .map_or("<no header>", |(header, _)| header)
}
