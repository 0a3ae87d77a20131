use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::brush::DEFAULT_BRUSH_SIZE_DIP;
use crate::color::{self, ColorParseError};

/// Environment variable naming a JSON config file for the host
pub const CONFIG_ENV_VAR: &str = "DOODLE_PAD_CONFIG";

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Display density must be positive, got {0}")]
    InvalidDensity(f32),

    #[error("Invalid palette entry {index}: {source}")]
    InvalidColor {
        index: usize,
        #[source]
        source: ColorParseError,
    },

    #[error("Invalid container background: {0}")]
    InvalidBackground(ColorParseError),
}

/// Settings for a drawing surface and the host around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct SurfaceConfig {
    /// Physical pixels per density-independent unit. Hosts that know their
    /// display scale multiply it in through [`Self::effective_density`].
    pub density: f32,
    /// Brush size applied when the surface is created, in DIP
    pub initial_brush_size: f32,
    /// Sizes offered by the brush dialog, in DIP
    pub brush_sizes: Vec<f32>,
    /// Color specs offered by the palette
    pub palette: Vec<String>,
    /// Fill beneath exported images, white when unset
    pub container_background: Option<String>,
    /// Where exported PNGs are written, the system temp dir when unset
    pub export_dir: Option<PathBuf>,
    pub export_prefix: String,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            initial_brush_size: DEFAULT_BRUSH_SIZE_DIP,
            brush_sizes: vec![10.0, 20.0, 30.0],
            palette: [
                "#000000", "#FF0000", "#FF9800", "#FFEB3B", "#4CAF50", "#2196F3", "#9C27B0", "#795548",
                "#FFFFFF",
            ]
            .iter()
            .map(|spec| (*spec).to_owned())
            .collect(),
            container_background: None,
            export_dir: None,
            export_prefix: "KDA_".to_owned(),
        }
    }
}

impl SurfaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density > 0.0 && self.density.is_finite()) {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        for (index, spec) in self.palette.iter().enumerate() {
            color::parse_color(spec).map_err(|source| ConfigError::InvalidColor { index, source })?;
        }
        self.container_background_color()?;
        Ok(())
    }

    /// Parsed palette; entries that fail to parse are skipped
    pub fn palette_colors(&self) -> Vec<(String, Rgba<u8>)> {
        self.palette
            .iter()
            .filter_map(|spec| color::parse_color(spec).ok().map(|color| (spec.clone(), color)))
            .collect()
    }

    pub fn container_background_color(&self) -> Result<Option<Rgba<u8>>, ConfigError> {
        self.container_background
            .as_deref()
            .map(color::parse_color)
            .transpose()
            .map_err(ConfigError::InvalidBackground)
    }

    /// Density for a display with `pixels_per_point`, with the configured
    /// density acting as a user scale on top
    pub fn effective_density(&self, pixels_per_point: f32) -> f32 {
        self.density * pixels_per_point
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
