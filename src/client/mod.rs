mod chat;
mod http;

pub use chat::{ChatSession, Role, TranscriptMessage};
pub use http::HttpVisionService;

use crate::{Result, detection::DetectedObject, frame::Frame};
use async_trait::async_trait;

/// The two server functions as seen from the client.
#[async_trait]
pub trait VisionService: Send + Sync {
    async fn analyze_frame(&self, frame: &Frame) -> Result<Vec<DetectedObject>>;

    async fn chat(&self, message: &str, detected_objects: &[String]) -> Result<String>;
}
