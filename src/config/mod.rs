#[cfg(feature = "cli")]
pub mod cli;
pub mod file;

use crate::adapters::gemini::GeminiConfig;
use crate::utils::error::Result;
use file::FileConfig;
use std::path::{Path, PathBuf};

/// Settings resolved for one process: CLI flags, optional settings file,
/// credential from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &cli::Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(Path::new(path))?,
            None => FileConfig::default(),
        };
        Ok(Self::from_parts(&cli.data_dir, file))
    }

    pub fn from_parts(data_dir: &str, file: FileConfig) -> Self {
        let mut gemini = GeminiConfig::from_env();
        if let Some(model) = file.model {
            gemini = gemini.with_model(model);
        }
        if let Some(endpoint) = file.endpoint {
            gemini = gemini.with_endpoint(endpoint);
        }

        Self {
            data_dir: PathBuf::from(data_dir),
            gemini,
        }
    }
}
