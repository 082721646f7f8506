mod client;
mod types;

pub use client::{GatewayClient, LlmClient};
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ContentPart,
    ResponseMessage,
};
