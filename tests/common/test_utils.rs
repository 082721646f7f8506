#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use omnivision_rust::{
    config::{CaptureConfig, Config, LlmConfig, LogsConfig, ServerConfig},
    llm::LlmClient,
    server::{router, state_with_client},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

pub const TEST_API_KEY: &str = "test-api-key";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        llm: LlmConfig {
            base_url: "https://gateway.example.com/v1".to_string(),
            api_key: Some(TEST_API_KEY.to_string()),
            model: "google/gemini-2.5-flash".to_string(),
            request_timeout_ms: 3000,
            system_prompt: None,
        },
        capture: CaptureConfig::default(),
    }
}

/// Same as [`create_test_config`] without a gateway credential
pub fn create_unconfigured_config() -> Config {
    let mut config = create_test_config();
    config.llm.api_key = None;
    config
}

pub fn create_test_app(config: &Config, llm: Arc<dyn LlmClient>) -> Router {
    router(state_with_client(config, llm))
}

/// POST a JSON body and return the status with the decoded JSON response
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

llm:
  base_url: "https://gateway.example.com/v1"
  api_key: "yaml-api-key"
  model: "vision-test-model"
  request_timeout_ms: 2500
  system_prompt: "You are a test assistant."

capture:
  service_url: "http://localhost:9090"
  interval_ms: 1500
  jpeg_quality: 0.6
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
"#;
