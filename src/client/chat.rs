use super::VisionService;
use crate::{
    Result,
    detection::{DetectedObject, object_names},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The client's transient, append-only chat transcript.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<TranscriptMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    /// Sends `input` with the current detections as context.
    ///
    /// Blank input is ignored and returns `Ok(None)`. The user message is
    /// recorded before the request; on failure it stays in the transcript
    /// and the error is returned so the caller can notify the user.
    pub async fn send(
        &mut self,
        service: &dyn VisionService,
        input: &str,
        detected_objects: &[DetectedObject],
    ) -> Result<Option<&TranscriptMessage>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        self.messages.push(TranscriptMessage::user(input));

        match service.chat(input, &object_names(detected_objects)).await {
            Ok(response) => {
                self.messages.push(TranscriptMessage::assistant(response));
                Ok(self.messages.last())
            }
            Err(e) => {
                warn!("Failed to send message: {}", e);
                Err(e)
            }
        }
    }
}
