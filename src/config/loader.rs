//! Configuration file discovery and loading.
//!
//! Configuration is optional. When `AE_PREFLIGHT_CONFIG` names a file it is
//! loaded on top of the built-in defaults; otherwise the defaults are used
//! as-is. Files ending in `.json` are parsed as JSON, everything else as YAML.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::PreflightConfig;
use crate::config::validator::validate;
use crate::error::{PreflightError, Result};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "AE_PREFLIGHT_CONFIG";

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Parse configuration text.
pub fn parse_config(content: &str, format: ConfigFormat, path: &Path) -> Result<PreflightConfig> {
    let parsed = match format {
        ConfigFormat::Yaml => {
            // An empty YAML document means "all defaults".
            if content.trim().is_empty() {
                return Ok(PreflightConfig::default());
            }
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        }
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| PreflightError::ConfigParseError {
        path: path.to_path_buf(),
        message,
    })
}

/// Load and validate a configuration file.
pub fn load_config_file(path: &Path) -> Result<PreflightConfig> {
    if !path.exists() {
        return Err(PreflightError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let config = parse_config(&content, ConfigFormat::from_path(path), path)?;
    validate(&config)?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve which config file, if any, should be loaded.
///
/// Takes the lookup function as a parameter so tests do not have to touch
/// the process environment.
pub fn config_path_from_env<F>(env_fn: F) -> Option<PathBuf>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    env_fn(CONFIG_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Load configuration from the environment, falling back to defaults.
pub fn load_config() -> Result<PreflightConfig> {
    match config_path_from_env(|key| std::env::var(key)) {
        Some(path) => load_config_file(&path),
        None => Ok(PreflightConfig::default()),
    }
}
