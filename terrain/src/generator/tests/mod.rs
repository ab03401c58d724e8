mod field_tests;
mod props_tests;

use crate::config::TerrainConfig;
use crate::field::TerrainField;

/// Field with the default shape and a fixed seed.
pub(super) fn default_field() -> TerrainField {
    TerrainField::new(TerrainConfig::default()).unwrap()
}

/// Field whose noise amplitude is zero, so every height is exactly 0.
pub(super) fn flat_field() -> TerrainField {
    let mut config = TerrainConfig::default();
    config.noise.height_scale = 0.0;
    TerrainField::new(config).unwrap()
}
