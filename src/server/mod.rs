pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::Config,
    llm::{GatewayClient, LlmClient},
    service::{ChatResponder, FrameAnalyzer},
};
use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub fn build_state(config: &Config) -> Result<AppState> {
    let llm: Arc<dyn LlmClient> = Arc::new(GatewayClient::new(&config.llm)?);
    Ok(state_with_client(config, llm))
}

/// Wires the services around an arbitrary LLM client.
pub fn state_with_client(config: &Config, llm: Arc<dyn LlmClient>) -> AppState {
    let api_key = config.llm.credential().map(str::to_string);

    AppState {
        analyzer: Arc::new(FrameAnalyzer::new(llm.clone(), api_key.clone())),
        responder: Arc::new(ChatResponder::new(
            llm,
            api_key.clone(),
            config.llm.system_prompt.clone(),
        )),
        credential_configured: api_key.is_some(),
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route("/analyze-frame", post(handlers::analyze_frame))
        .route("/chat-with-context", post(handlers::chat_with_context))
        .route("/api/health", get(handlers::health))
        .route("/api/status", get(handlers::status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = build_state(&config)?;
    if !app_state.credential_configured {
        warn!("No gateway credential configured; requests will fail until one is set");
    }

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
