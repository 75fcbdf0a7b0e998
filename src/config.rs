//! Pipeline configuration loaded from YAML.
//!
//! Every section and key is optional; missing values fall back to the
//! dataset defaults.
//!
//! ```yaml
//! grid:
//!   width: 600
//!   height: 248
//!   spacing: 0.001
//! curl:
//!   depth_neighbor: zero      # or next_layer
//! derivation:
//!   strict: false
//! input:
//!   scalar_dir: data/extracted/scalar
//!   vector_dir: data/extracted/vector
//! timesteps: [1, 2, 3, 49]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::{CurlConfig, DEFAULT_SPACING, DepthNeighbor, DerivationOptions};
use crate::io::{SCALAR_STEM, TimestepFiles, VECTOR_STEM};
use crate::types::GridShape;

/// Timesteps processed when none are given.
pub const DEFAULT_TIMESTEPS: [u32; 14] = [1, 2, 3, 6, 9, 14, 19, 29, 49, 69, 99, 129, 159, 189];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub grid: GridConfig,
    pub curl: CurlSettings,
    pub derivation: DerivationOptions,
    pub input: InputConfig,
    pub timesteps: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub spacing: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurlSettings {
    pub depth_neighbor: DepthNeighbor,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub scalar_dir: PathBuf,
    pub vector_dir: PathBuf,
    pub scalar_stem: String,
    pub vector_stem: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            curl: CurlSettings::default(),
            derivation: DerivationOptions::default(),
            input: InputConfig::default(),
            timesteps: DEFAULT_TIMESTEPS.to_vec(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        let shape = GridShape::DATASET;
        Self {
            width: shape.width(),
            height: shape.height(),
            spacing: DEFAULT_SPACING,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scalar_dir: PathBuf::from("data/extracted/scalar"),
            vector_dir: PathBuf::from("data/extracted/vector"),
            scalar_stem: SCALAR_STEM.to_string(),
            vector_stem: VECTOR_STEM.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if !(self.grid.spacing.is_finite() && self.grid.spacing > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid spacing must be positive, got {}",
                self.grid.spacing
            )));
        }
        Ok(())
    }

    /// Slice shape of the configured grid.
    pub fn shape(&self) -> Result<GridShape, ConfigError> {
        self.validate()?;
        Ok(GridShape::new(self.grid.width, self.grid.height))
    }

    /// Curl engine settings.
    pub fn curl_config(&self) -> Result<CurlConfig, ConfigError> {
        Ok(CurlConfig::new(self.shape()?)
            .with_spacing(self.grid.spacing)
            .with_depth_neighbor(self.curl.depth_neighbor))
    }

    /// Scalar input files.
    pub fn scalar_files(&self) -> TimestepFiles {
        TimestepFiles::new(&self.input.scalar_dir, self.input.scalar_stem.as_str())
    }

    /// Velocity input files.
    pub fn vector_files(&self) -> TimestepFiles {
        TimestepFiles::new(&self.input.vector_dir, self.input.vector_stem.as_str())
    }
}

/// Parse a configuration from YAML text.
pub fn from_yaml(text: &str) -> Result<PipelineConfig, serde_yaml::Error> {
    // an empty document is a null value, not an empty mapping
    if text.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    serde_yaml::from_str(text)
}

/// Load and validate a configuration file.
pub fn load(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = from_yaml(&text).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
