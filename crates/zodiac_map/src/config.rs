use crate::error::{MapToolError, Result};
use std::{env, path::PathBuf};
use zodiac_engine::Config;

const ENV_DATA_DIR: &str = "ZODIAC_MAP_DATA_DIR";
const ENV_CONFIG: &str = "ZODIAC_MAP_CONFIG";
const ENV_OUTPUT_DIR: &str = "ZODIAC_MAP_OUTPUT_DIR";

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            config_path: None,
            output_dir: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let mut settings = Self::default();

        if let Some(path) = get(ENV_DATA_DIR) {
            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(MapToolError::InvalidConfiguration(format!(
                    "Data path is not a directory: {}",
                    path.display()
                )));
            }
            settings.data_dir = path;
        }

        settings.config_path = get(ENV_CONFIG);
        settings.output_dir = get(ENV_OUTPUT_DIR);
        Ok(settings)
    }

    /// Loads the map configuration, falling back to defaults when no file is set
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        if let Some(dir) = &self.output_dir {
            config.export.output_dir = dir.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_DATA_DIR, "   \t\n   "),
            (ENV_CONFIG, ""),
        ]))
        .unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_valid_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().to_string_lossy().to_string();
        let settings = Settings::from_lookup(lookup(&[(ENV_DATA_DIR, &path)])).unwrap();
        assert_eq!(settings.data_dir, temp_dir.path());
    }

    #[test]
    fn test_data_dir_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("roster.json");
        std::fs::write(&file, "[]").unwrap();

        let path = file.to_string_lossy().to_string();
        let err = Settings::from_lookup(lookup(&[(ENV_DATA_DIR, &path)])).unwrap_err();
        assert!(matches!(err, MapToolError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_load_config_with_output_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("zodiac.toml");
        std::fs::write(&config_path, "[map]\nradius = 200.0\n").unwrap();

        let settings = Settings {
            config_path: Some(config_path),
            output_dir: Some(temp_dir.path().join("out")),
            ..Settings::default()
        };
        let config = settings.load_config().unwrap();
        assert_eq!(config.map.radius, 200.0);
        assert_eq!(config.export.output_dir, temp_dir.path().join("out"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let settings = Settings {
            config_path: Some(PathBuf::from("/nonexistent/zodiac.toml")),
            ..Settings::default()
        };
        assert!(matches!(
            settings.load_config(),
            Err(MapToolError::Engine(_))
        ));
    }
}
