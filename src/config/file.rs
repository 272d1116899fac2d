use crate::utils::error::{OpsError, Result};
use crate::utils::validation::validate_url;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML settings file. The Gemini credential deliberately has no
/// key here; it comes from the environment only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(text).map_err(|e| OpsError::ConfigError {
            message: format!("invalid settings file: {}", e),
        })?;
        if let Some(endpoint) = &config.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        Ok(config)
    }
}
