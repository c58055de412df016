//! Configuration loading from disk.

use std::path::Path;
use thiserror::Error;

use crate::config::schema::DecoyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_VAR: &str = "DECOY_CONFIG";

/// Path tried when the environment variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "decoy.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DecoyConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: DecoyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the config for this process: the file named by `DECOY_CONFIG`,
/// then `decoy.toml` if it exists, then built-in defaults.
///
/// A path that is set but unreadable or invalid is an error; a missing
/// default file is not.
pub fn load_default() -> Result<DecoyConfig, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return load_config(Path::new(&path));
    }

    let fallback = Path::new(DEFAULT_CONFIG_PATH);
    if fallback.exists() {
        return load_config(fallback);
    }

    Ok(DecoyConfig::default())
}
