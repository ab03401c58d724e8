// generator/src/config.rs

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use pathwalk_pose::{Calibration, Joint, PoseError, RigConfig, RigError};
use pathwalk_terrain::{TerrainConfig, TerrainError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Pose(#[from] PoseError),
    #[error(transparent)]
    Rig(#[from] RigError),
    #[error("failed to parse {path}: {source}")]
    Config { path: String, source: toml::de::Error },
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("invalid color gradient: {0}")]
    Gradient(String),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contents of `pathwalk.toml`. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub terrain: TerrainConfig,
    pub calibration: Calibration,
    pub rig: RigConfig,
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path` when given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| AppError::Io { path: display.clone(), source })?;
        let config = Self::from_toml_str(&text)
            .map_err(|source| AppError::Config { path: display.clone(), source })?;
        config.terrain.validate()?;
        info!("loaded config from {display}");
        Ok(config)
    }

    pub fn bone_table(&self) -> Result<BTreeMap<Joint, String>, RigError> {
        self.rig.table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn sections_are_read() {
        let config = AppConfig::from_toml_str(
            r##"
            [terrain.noise]
            seed = 7

            [terrain.chunk]
            radius = 3

            [terrain.path]
            path_color = "#000000"

            [calibration]
            swap_sides = false

            [rig.bones]
            Head = "mixamorig:Head"
            "##,
        )
        .unwrap();

        assert_eq!(config.terrain.noise.seed, 7);
        assert_eq!(config.terrain.chunk.radius, 3);
        assert_eq!(config.terrain.chunk.size, 50.0);
        assert_eq!(config.terrain.path.path_color.to_hex(), "#000000");
        assert!(!config.calibration.swap_sides);
        assert_eq!(config.bone_table().unwrap()[&Joint::Head], "mixamorig:Head");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/pathwalk.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pathwalk.toml"));
    }
}
