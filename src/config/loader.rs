//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_USERS_SERVICE_URL: &str = "USERS_SERVICE_URL";
pub const ENV_PRODUCTS_SERVICE_URL: &str = "PRODUCTS_SERVICE_URL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    Env {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, then the process environment.
///
/// Without a file, every field starts from its default.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse TOML without validating.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay `PORT`, `LOG_LEVEL`, `USERS_SERVICE_URL` and `PRODUCTS_SERVICE_URL`.
///
/// `lookup` resolves a variable name; empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(value) = get(ENV_PORT) {
        config.listener.port = value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Env {
            key: ENV_PORT,
            reason: e.to_string(),
            value,
        })?;
    }

    if let Some(value) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = value.parse().map_err(|reason| ConfigError::Env {
            key: ENV_LOG_LEVEL,
            reason,
            value,
        })?;
    }

    if let Some(value) = get(ENV_USERS_SERVICE_URL) {
        config.upstreams.users_service_url = value;
    }

    if let Some(value) = get(ENV_PRODUCTS_SERVICE_URL) {
        config.upstreams.products_service_url = value;
    }

    Ok(())
}
