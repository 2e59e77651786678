use crate::utils::{CONFIG_FILE, DEFAULT_NICE, DEFAULT_QUALITY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn default_source_format() -> String {
    "flac".to_string()
}

fn default_output_format() -> String {
    "ogg".to_string()
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

fn default_nice() -> i32 {
    DEFAULT_NICE
}

/// Per-library defaults, overridable from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OggifyConfig {
    /// Codec name for source files
    #[serde(default = "default_source_format")]
    pub source_format: String,

    /// Codec name for destination files
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Encoding quality, 0-10 (see oggenc(1))
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Niceness applied to codec processes
    #[serde(default = "default_nice")]
    pub nice: i32,
}

impl Default for OggifyConfig {
    fn default() -> Self {
        Self {
            source_format: default_source_format(),
            output_format: default_output_format(),
            quality: default_quality(),
            nice: default_nice(),
        }
    }
}

/// Read `oggify.json` from `dir`, if present.
pub async fn read_config(dir: &Path) -> Result<Option<OggifyConfig>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).await?;
    let config: OggifyConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}
