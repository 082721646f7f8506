use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Settings for the client-side capture loop and its HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// JPEG quality factor in (0, 1].
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: f32,
    #[serde(default = "default_client_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn validate(&self) -> crate::Result<()> {
        if self.llm.request_timeout_ms == 0 {
            return Err(crate::Error::config("llm.request_timeout_ms must be positive"));
        }
        if self.capture.interval_ms == 0 {
            return Err(crate::Error::config("capture.interval_ms must be positive"));
        }
        if !(self.capture.jpeg_quality > 0.0 && self.capture.jpeg_quality <= 1.0) {
            return Err(crate::Error::config(format!(
                "capture.jpeg_quality must be in (0, 1], got {}",
                self.capture.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl LlmConfig {
    /// The gateway credential, if one is set and non-empty.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            request_timeout_ms: default_llm_timeout_ms(),
            system_prompt: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            interval_ms: default_interval_ms(),
            jpeg_quality: default_jpeg_quality(),
            request_timeout_ms: default_client_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}

fn default_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_llm_timeout_ms() -> u64 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_interval_ms() -> u64 {
    3000
}

fn default_jpeg_quality() -> f32 {
    0.8
}

fn default_client_timeout_ms() -> u64 {
    10_000
}
