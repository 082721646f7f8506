use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No frame provided")]
    MissingFrame,

    #[error("No message provided")]
    MissingMessage,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not configured")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("AI API error: {status}")]
    Upstream { status: u16 },

    #[error("AI API error: request timed out after {timeout_ms}ms")]
    UpstreamTimeout { timeout_ms: u64 },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("{0}")]
    Service(String),

    #[error("Camera access denied: {0}")]
    CameraAccessDenied(String),

    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Invalid frame: {0}")]
    Frame(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    pub fn frame(msg: impl Into<String>) -> Self {
        Self::Frame(msg.into())
    }

    /// Whether the failure came from the AI gateway rather than from the
    /// caller or from local configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::UpstreamTimeout { .. } | Self::Network(_)
        )
    }
}
