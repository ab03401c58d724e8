// src/config.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, GROUND_COLOR, PATH_COLOR};
use crate::coords::CHUNK_SIZE;
use crate::error::TerrainError;

/// Everything that shapes the generated world. All sections fall back to defaults, so an
/// empty TOML table is a valid config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub noise: NoiseConfig,
    pub path: PathConfig,
    pub chunk: ChunkConfig,
    pub props: PropConfig,
}

/// Fractal noise layered into the raw height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: u32,
    /// Frequency of the first octave. Smaller is smoother.
    pub scale: f64,
    /// Amplitude of the first octave.
    pub height_scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scale: 0.02,
            height_scale: 5.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// The road: `x = sin(z * f1) * a1 + cos(z * f2) * a2`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub sin_frequency: f32,
    pub sin_amplitude: f32,
    pub cos_frequency: f32,
    pub cos_amplitude: f32,
    /// Half-width of the flat road.
    pub width: f32,
    /// Distance over which the road ramps up into full terrain.
    pub blend: f32,
    pub path_color: Rgb,
    pub ground_color: Rgb,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            sin_frequency: 0.05,
            sin_amplitude: 10.0,
            cos_frequency: 0.02,
            cos_amplitude: 5.0,
            width: 4.0,
            blend: 3.0,
            path_color: PATH_COLOR,
            ground_color: GROUND_COLOR,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub size: f32,
    /// Grid cells per chunk edge.
    pub resolution: u32,
    /// Chunks kept on each side of the viewer's chunk.
    pub radius: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: CHUNK_SIZE,
            resolution: 32,
            radius: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropConfig {
    /// Candidates drawn per chunk; those too close to the road are dropped.
    pub attempts: u32,
    pub clearance: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            attempts: 20,
            clearance: 4.0,
            min_scale: 0.5,
            max_scale: 1.5,
        }
    }
}

impl TerrainConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, TerrainError> {
        let config: TerrainConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TerrainError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        let invalid = |msg: &str| Err(TerrainError::InvalidConfig(msg.to_string()));

        if self.noise.octaves == 0 {
            return invalid("noise.octaves must be at least 1");
        }
        if !(self.path.width >= 0.0) {
            return invalid("path.width must not be negative");
        }
        if !(self.path.blend > 0.0) {
            return invalid("path.blend must be positive");
        }
        if !(self.chunk.size > 0.0) {
            return invalid("chunk.size must be positive");
        }
        if self.chunk.resolution == 0 {
            return invalid("chunk.resolution must be at least 1");
        }
        if !(self.props.min_scale <= self.props.max_scale) {
            return invalid("props.min_scale must not exceed props.max_scale");
        }
        Ok(())
    }
}
