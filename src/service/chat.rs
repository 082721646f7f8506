use super::require_credential;
use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_CHAT_PROMPT: &str = "You are OmniVision, a helpful AI assistant that can see \
through the user's camera. Answer questions accurately and concisely.";

pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Answers user questions with the current detections as context.
pub struct ChatResponder {
    llm: Arc<dyn LlmClient>,
    api_key: Option<String>,
    system_prompt: String,
}

impl ChatResponder {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        api_key: Option<String>,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            llm,
            api_key,
            system_prompt: system_prompt.unwrap_or_else(|| DEFAULT_CHAT_PROMPT.to_string()),
        }
    }

    pub async fn respond(
        &self,
        message: Option<&str>,
        detected_objects: &[String],
    ) -> Result<String> {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .ok_or(Error::MissingMessage)?;
        let api_key = require_credential(self.api_key.as_deref())?;

        debug!(
            "Answering chat message with {} detected objects in context",
            detected_objects.len()
        );

        let request = ChatCompletionRequest {
            messages: vec![
                ChatMessage::system(self.system_context(detected_objects)),
                ChatMessage::user(message),
            ],
            temperature: Some(CHAT_TEMPERATURE),
        };

        let response = self.llm.create_chat_completion(api_key, request).await?;
        let answer = response
            .first_content()
            .ok_or_else(|| Error::llm("Empty response from model"))?;

        info!("Generated chat response ({} chars)", answer.len());
        Ok(answer.to_string())
    }

    fn system_context(&self, detected_objects: &[String]) -> String {
        let names: Vec<&str> = detected_objects
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            format!(
                "{}\n\nNo objects are currently detected in the camera feed.",
                self.system_prompt
            )
        } else {
            format!(
                "{}\n\nObjects currently visible in the camera feed: {}.",
                self.system_prompt,
                names.join(", ")
            )
        }
    }
}
