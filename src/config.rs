use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

/// The file the dashboard reads when no configuration overrides it.
pub const DEFAULT_DATA_PATH: &str = "Avacado_data(1972-).csv";
pub const DEFAULT_TITLE: &str = concat!(
    "California Avocado Insights Dashboard: ",
    "Unveiling Crop Value and Volume Trends 🥑"
);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Startup options. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    pub sidebar_open: bool,
    pub show_data_table: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            title: DEFAULT_TITLE.to_string(),
            window_size: [1400.0, 900.0],
            sidebar_open: false,
            show_data_table: false,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default configuration", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "data_path": "crops.parquet", "sidebar_open": true }"#;
        let config = DashboardConfig::from_json(json).unwrap();
        assert_eq!(config.data_path, PathBuf::from("crops.parquet"));
        assert!(config.sidebar_open);
        assert_eq!(config.window_size, DashboardConfig::default().window_size);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = DashboardConfig::load_or_default(Path::new("no/such/dashboard.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DashboardConfig::from_json("{ data_path: }").is_err());
    }
}
