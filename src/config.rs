//! Runtime configuration from the environment (and `.env` via dotenvy)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::estimator::models::AppSettings;
use crate::estimator::validation;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// JSON file holding the default business settings
    pub settings_path: Option<PathBuf>,
}

impl Config {
    /// Read `HOST`, `PORT` and `ESTIMATOR_SETTINGS_PATH` from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            settings_path: var("ESTIMATOR_SETTINGS_PATH").map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the default settings file, if one is configured
    pub fn load_settings(&self) -> Result<Option<AppSettings>> {
        match &self.settings_path {
            Some(path) => load_settings_file(path).map(Some),
            None => Ok(None),
        }
    }
}

/// Read and check an `AppSettings` JSON document
pub fn load_settings_file(path: &Path) -> Result<AppSettings> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: AppSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    validation::validate_settings(&settings)
        .with_context(|| format!("Settings file {} is out of range", path.display()))?;

    tracing::info!("Loaded business settings from {}", path.display());
    Ok(settings)
}
