// src/mesh.rs

/// Renderable terrain surface for one chunk.
///
/// Positions are chunk-local on X/Z (relative to the chunk center) with world height on Y,
/// so the host places the mesh at the chunk center.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Lowest and highest vertex heights, or `None` for an empty mesh.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.positions.iter().map(|p| p[1]).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }
}
