use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::types as openai_types;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends one chat completion authenticated with `api_key`. Never retries.
    async fn create_chat_completion(
        &self,
        api_key: &str,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Client for an OpenAI-compatible chat-completion gateway.
///
/// Requests are built with `async-openai` types and sent with `reqwest`
/// directly so the upstream status code stays visible and no automatic
/// backoff is applied.
pub struct GatewayClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    timeout_ms: u64,
}

impl GatewayClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            http,
            endpoint,
            model: config.model.clone(),
            timeout_ms: config.request_timeout_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<openai_types::CreateChatCompletionRequest> {
        let mut messages = Vec::with_capacity(request.messages.len());
        for msg in request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(messages);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        Ok(request_builder.build()?)
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::UpstreamTimeout {
                timeout_ms: self.timeout_ms,
            }
        } else {
            Error::Network(err)
        }
    }
}

#[async_trait]
impl LlmClient for GatewayClient {
    async fn create_chat_completion(
        &self,
        api_key: &str,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            "Creating chat completion with {} messages",
            request.messages.len()
        );

        let openai_request = self.build_request(request)?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "AI API error");
            return Err(Error::Upstream {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(
            "Received chat completion response with {} choices",
            completion.choices.len()
        );

        Ok(completion)
    }
}
