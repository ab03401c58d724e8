use log::debug;
use nalgebra::Vector3;

use crate::{
    config::ChunkConfig,
    coords::ChunkKey,
    field::TerrainField,
    mesh::ChunkMesh,
};

/// Builds a regular height-field grid over one chunk.
pub struct MeshGenerator {
    size: f32,
    resolution: u32,
}

impl MeshGenerator {
    pub fn new(size: f32, resolution: u32) -> Self {
        Self { size, resolution: resolution.max(1) }
    }

    pub fn from_config(config: &ChunkConfig) -> Self {
        Self::new(config.size, config.resolution)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// `(resolution + 1)^2` vertices spanning the chunk extent, row-major in z then x.
    pub fn generate(&self, field: &TerrainField, key: ChunkKey) -> ChunkMesh {
        let res = self.resolution as i64;
        let stride = (res + 1) as usize;
        let step = self.size / self.resolution as f32;
        let half = self.size / 2.0;
        let center = key.center(self.size);

        let mut positions = Vec::with_capacity(stride * stride);
        let mut colors = Vec::with_capacity(stride * stride);

        for iz in 0..=res {
            for ix in 0..=res {
                // Derive world coords from the global grid index so neighbouring chunks
                // evaluate the exact same points along their shared edge.
                let world_x = (key.x as i64 * res + ix) as f32 * step - half;
                let world_z = (key.z as i64 * res + iz) as f32 * step - half;

                let height = field.sample_height(world_x, world_z);
                let color = field.sample_color(world_x, world_z);

                positions.push([world_x - center.x, height, world_z - center.z]);
                colors.push(color.to_array());
            }
        }

        let mut indices: Vec<u32> = Vec::with_capacity(self.resolution as usize * self.resolution as usize * 6);
        for iz in 0..self.resolution as usize {
            for ix in 0..self.resolution as usize {
                let v00 = (iz * stride + ix) as u32;
                let v01 = v00 + 1;
                let v10 = v00 + stride as u32;
                let v11 = v10 + 1;

                // counter-clockwise seen from +Y
                indices.extend([v00, v10, v01, v01, v10, v11]);
            }
        }

        let normals = smooth_normals(&positions, &indices);

        debug!(
            "Built mesh for chunk {}: {} vertices, {} triangles",
            key,
            positions.len(),
            indices.len() / 3
        );

        ChunkMesh {
            positions,
            normals,
            colors,
            indices,
        }
    }
}

/// Per-vertex normals from area-weighted adjacent face normals.
pub(crate) fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc: Vec<Vector3<f32>> = vec![Vector3::zeros(); positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vector3::from(positions[a]);
        let pb = Vector3::from(positions[b]);
        let pc = Vector3::from(positions[c]);

        // unnormalized: larger faces weigh more
        let face = (pb - pa).cross(&(pc - pa));
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }

    acc.into_iter()
        .map(|n| {
            let n = n.try_normalize(1.0e-12).unwrap_or_else(Vector3::y);
            [n.x, n.y, n.z]
        })
        .collect()
}
