use crate::rendering::RasterFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which frames share a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteScope {
    /// One palette across every frame of every input
    #[default]
    Batch,
    /// Each frame gets its own palette
    Frame,
}

/// Run configuration, optionally loaded from a YAML file
///
/// ```yaml
/// format: ppm
/// output_dir: out
/// palette_scope: frame
/// seed: 42
/// ```
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Output raster format
    pub format: RasterFormat,

    /// Directory for output files (current directory if unset)
    pub output_dir: Option<PathBuf>,

    /// Palette sharing between frames
    pub palette_scope: PaletteScope,

    /// Seed for the palette map's level generator
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            format = ?config.format,
            scope = ?config.palette_scope,
            "Loaded configuration"
        );
        Ok(config)
    }
}
