mod analyze;
mod chat;

pub use analyze::{DETECTION_PROMPT, DETECTION_TEMPERATURE, FrameAnalyzer};
pub use chat::{CHAT_TEMPERATURE, ChatResponder, DEFAULT_CHAT_PROMPT};

use crate::{Error, Result, config::API_KEY_ENV};

fn require_credential(api_key: Option<&str>) -> Result<&str> {
    api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::MissingCredential(API_KEY_ENV.to_string()))
}
