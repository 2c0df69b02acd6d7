use serde::Deserialize;

use crate::engine::limits::ExecutionLimits;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cognitive: CognitiveConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub http_addr: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

#[derive(Debug, Deserialize)]
pub struct CognitiveConfig {
    /// Hard ceiling on concurrent bus subscribers (resource-exhaustion guard).
    #[serde(default = "default_max_subscribers")]
    pub max_subscribers: usize,
    /// SSE keep-alive interval in seconds.
    #[serde(default = "default_heartbeat_s")]
    pub heartbeat_s: u64,
    /// Default aggregation tick interval for streaming sessions.
    #[serde(default = "default_sample_ms")]
    pub default_sample_ms: u64,
    /// Server-side defaults for one-shot query limits.
    #[serde(default)]
    pub limits: ExecutionLimits,
}

fn default_max_subscribers() -> usize {
    100
}

fn default_heartbeat_s() -> u64 {
    30
}

fn default_sample_ms() -> u64 {
    5000
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("COGNIDB_CONFIG").unwrap_or_else(|_| "config".to_string());

    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
