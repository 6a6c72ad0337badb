use std::env;
use anyhow::{Result, Context};
use tracing::{info, warn};

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub max_body_size_mb: usize,
    pub anthropic_api_url: String,
    pub anthropic_model: String,
    pub anthropic_version: String,
    pub anthropic_max_tokens: u32,
    /// Reject replies that do not carry all six fields.
    pub strict_schema: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Config {
            server_host: Self::string_env_var("SERVER_HOST", "0.0.0.0"),
            server_port: Self::parse_env_var("SERVER_PORT", 8080)
                .context("Failed to parse SERVER_PORT")?,
            max_body_size_mb: Self::parse_env_var("MAX_BODY_SIZE_MB", 32)
                .context("Failed to parse MAX_BODY_SIZE_MB")?,
            anthropic_api_url: Self::string_env_var("ANTHROPIC_API_URL", DEFAULT_ANTHROPIC_API_URL),
            anthropic_model: Self::string_env_var("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            anthropic_version: Self::string_env_var("ANTHROPIC_VERSION", DEFAULT_ANTHROPIC_VERSION),
            anthropic_max_tokens: Self::parse_env_var("ANTHROPIC_MAX_TOKENS", 1000)
                .context("Failed to parse ANTHROPIC_MAX_TOKENS")?,
            strict_schema: Self::parse_env_var("STRICT_SCHEMA", false)
                .context("Failed to parse STRICT_SCHEMA")?,
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    fn string_env_var(var_name: &str, default: &str) -> String {
        match env::var(var_name) {
            Ok(val) if !val.trim().is_empty() => val,
            _ => {
                info!("{} not set, using default: {}", var_name, default);
                default.to_string()
            }
        }
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.trim().parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.max_body_size_mb == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB must be greater than 0"));
        }
        if self.anthropic_max_tokens == 0 {
            return Err(anyhow::anyhow!("ANTHROPIC_MAX_TOKENS must be greater than 0"));
        }
        if !self.anthropic_api_url.starts_with("http://") && !self.anthropic_api_url.starts_with("https://") {
            return Err(anyhow::anyhow!("ANTHROPIC_API_URL must be an http(s) URL"));
        }
        Ok(())
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            max_body_size_mb: 32,
            anthropic_api_url: DEFAULT_ANTHROPIC_API_URL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            anthropic_max_tokens: 1000,
            strict_schema: false,
        }
    }
}
