// src/field.rs

use noise::{NoiseFn, Simplex};

use crate::color::Rgb;
use crate::config::TerrainConfig;
use crate::coords::WorldPoint;
use crate::error::TerrainError;

/// Terrain evaluated at one world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    pub color: Rgb,
    /// 1 on the road, 0 beyond the blend band.
    pub path_blend: f32,
}

/// Height and ground color as pure functions of world position.
///
/// Neighbouring chunks sample shared edges independently, so every query must give
/// bit-identical output for identical input. The field holds no mutable state.
#[derive(Clone, Debug)]
pub struct TerrainField {
    noise: Simplex,
    config: TerrainConfig,
}

impl TerrainField {
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        Ok(Self {
            noise: Simplex::new(config.noise.seed),
            config,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.config.noise.seed
    }

    /// Horizontal center of the road at depth `z`.
    pub fn path_center_x(&self, z: f32) -> f32 {
        let p = &self.config.path;
        (z * p.sin_frequency).sin() * p.sin_amplitude + (z * p.cos_frequency).cos() * p.cos_amplitude
    }

    /// Fractal noise height before the road is carved in.
    pub fn raw_height(&self, x: f32, z: f32) -> f32 {
        let n = &self.config.noise;
        let (x, z) = (x as f64, z as f64);

        let mut amplitude = n.height_scale;
        let mut frequency = n.scale;
        let mut height = 0.0;

        for _ in 0..n.octaves {
            height += self.noise.get([x * frequency, z * frequency]) * amplitude;
            amplitude *= n.persistence;
            frequency *= n.lacunarity;
        }

        height as f32
    }

    /// Multiplier applied to the raw height: 0 on the road, a linear ramp across the blend
    /// band, 1 beyond it.
    fn height_factor(&self, x: f32, z: f32) -> f32 {
        let p = &self.config.path;
        let d = (x - self.path_center_x(z)).abs();

        if d < p.width {
            0.0
        } else if d < p.width + p.blend {
            (d - p.width) / p.blend
        } else {
            1.0
        }
    }

    /// Road weight at `(x, z)`: 1 on the road, 0 past the blend band.
    pub fn path_blend(&self, x: f32, z: f32) -> f32 {
        1.0 - self.height_factor(x, z)
    }

    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        self.sample(WorldPoint::new(x, z)).height
    }

    pub fn sample_color(&self, x: f32, z: f32) -> Rgb {
        self.sample(WorldPoint::new(x, z)).color
    }

    /// Height, color and road weight from one evaluation of the blend factor.
    pub fn sample(&self, point: WorldPoint) -> HeightSample {
        let factor = self.height_factor(point.x, point.z);
        let p = &self.config.path;
        let height = if factor == 0.0 {
            // exactly flat, even where the noise is negative
            0.0
        } else {
            self.raw_height(point.x, point.z) * factor
        };
        let path_blend = 1.0 - factor;
        HeightSample {
            height,
            color: Rgb::lerp(p.ground_color, p.path_color, path_blend),
            path_blend,
        }
    }
}
