// src/coords.rs

use serde::{Deserialize, Serialize};

/// Horizontal world position. Height is derived from the terrain, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

/// Chunk indices on the XZ plane.
///
/// Chunk `(x, z)` is centered on world `(x * size, z * size)` and covers
/// `[x*size - size/2, x*size + size/2)` along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk whose center is nearest to `point`.
    pub fn containing(point: WorldPoint, size: f32) -> Self {
        Self {
            x: (point.x / size).round() as i32,
            z: (point.z / size).round() as i32,
        }
    }

    pub fn center(&self, size: f32) -> WorldPoint {
        WorldPoint {
            x: self.x as f32 * size,
            z: self.z as f32 * size,
        }
    }

    /// Pulls the key inward so a window of `radius` chunks around it fits in `i32`.
    pub fn clamped(&self, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        let (lo, hi) = (i32::MIN + r, i32::MAX - r);
        Self {
            x: self.x.clamp(lo, hi),
            z: self.z.clamp(lo, hi),
        }
    }
}

impl std::fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// World units per chunk edge.
pub const CHUNK_SIZE: f32 = 50.0;
