use crate::{
    constants::{DEFAULT_CANVAS_SIZE, DEFAULT_CENTER, DEFAULT_PADDING, DEFAULT_RADIUS},
    error::{Result, ZodiacError},
    geometry::{MapGeometry, Point},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Map layout (px)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub padding: f64,
    pub canvas_size: u32, // square canvas
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_x: DEFAULT_CENTER.0,
            center_y: DEFAULT_CENTER.1,
            radius: DEFAULT_RADIUS,
            padding: DEFAULT_PADDING,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    // labels are skipped in PNG export without a font
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("figs"),
            font_path: None,
            font_size: 28.0,
        }
    }
}

impl Config {
    /// Reads and validates a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ZodiacError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ZodiacError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks layout and export values
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        if !map.center_x.is_finite() || !map.center_y.is_finite() {
            return Err(ZodiacError::Config(format!(
                "map center must be finite, got ({}, {})",
                map.center_x, map.center_y
            )));
        }
        if !(map.radius.is_finite() && map.radius > 0.0) {
            return Err(ZodiacError::Config(format!(
                "map.radius must be positive, got {}",
                map.radius
            )));
        }
        if !(map.padding.is_finite() && map.padding >= 0.0) {
            return Err(ZodiacError::Config(format!(
                "map.padding must not be negative, got {}",
                map.padding
            )));
        }
        if map.canvas_size == 0 {
            return Err(ZodiacError::Config(
                "map.canvas_size must be greater than 0".to_string(),
            ));
        }
        if !(self.export.font_size.is_finite() && self.export.font_size > 0.0) {
            return Err(ZodiacError::Config(format!(
                "export.font_size must be positive, got {}",
                self.export.font_size
            )));
        }
        Ok(())
    }

    pub fn geometry(&self) -> MapGeometry {
        MapGeometry::new(
            Point::new(self.map.center_x, self.map.center_y),
            self.map.radius,
            self.map.padding,
        )
    }
}
