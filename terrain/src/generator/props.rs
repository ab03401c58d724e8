use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::PropConfig,
    coords::ChunkKey,
    field::TerrainField,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    Pine,
    Broadleaf,
    Rock,
    Bush,
}

impl PropKind {
    pub const ALL: [PropKind; 4] = [
        PropKind::Pine,
        PropKind::Broadleaf,
        PropKind::Rock,
        PropKind::Bush,
    ];
}

/// A decoration placed on a chunk. `position` is chunk-local on X/Z with world height on Y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub position: [f32; 3],
    pub scale: f32,
}

/// Stable per-chunk RNG seed mixed from the world seed and the chunk indices.
pub fn chunk_seed(seed: u32, key: ChunkKey) -> u64 {
    // splitmix64 finalizer over the packed inputs
    let mut h = (seed as u64) ^ ((key.x as u32 as u64) << 32) ^ (key.z as u32 as u64).rotate_left(17);
    h = h.wrapping_add(0x9E37_79B9_7F4A_7C15);
    h = (h ^ (h >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 31)
}

/// Scatters trees and rocks over a chunk, keeping them off the road.
pub struct PropGenerator {
    size: f32,
    config: PropConfig,
}

impl PropGenerator {
    pub fn new(size: f32, config: PropConfig) -> Self {
        Self { size, config }
    }

    pub fn generate(&self, field: &TerrainField, key: ChunkKey) -> Vec<Prop> {
        let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed(field.seed(), key));
        let half = self.size / 2.0;
        let center = key.center(self.size);
        let mut props = Vec::new();

        for _ in 0..self.config.attempts {
            // Draw every value up front so rejections don't shift later candidates.
            let lx = rng.random_range(-half..half);
            let lz = rng.random_range(-half..half);
            let t: f32 = rng.random();
            let kind = PropKind::ALL[rng.random_range(0..PropKind::ALL.len())];

            let wx = center.x + lx;
            let wz = center.z + lz;

            if (wx - field.path_center_x(wz)).abs() <= self.config.clearance {
                continue;
            }

            let scale = self.config.min_scale + (self.config.max_scale - self.config.min_scale) * t;
            props.push(Prop {
                kind,
                position: [lx, field.sample_height(wx, wz), lz],
                scale,
            });
        }

        debug!("Placed {}/{} props in chunk {}", props.len(), self.config.attempts, key);
        props
    }
}
