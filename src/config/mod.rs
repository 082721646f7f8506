mod types;

pub use types::*;

use crate::Result;
use std::{env, path::Path};
use tracing::debug;

/// Environment variable holding the AI gateway credential.
pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_from_path(&config_path).await?;
    apply_env_overrides(&mut config, |key| env::var(key).ok());

    Ok(config)
}

/// Reads a YAML config file. A missing file yields the defaults.
pub async fn load_from_path(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    debug!("Loading configuration from: {}", config_path.display());

    if !tokio::fs::try_exists(config_path).await? {
        debug!(
            "No configuration file at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.validate()?;

    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup(API_KEY_ENV) {
        debug!("Using gateway credential from {}", API_KEY_ENV);
        config.llm.api_key = Some(api_key);
    }
}
