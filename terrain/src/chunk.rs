// src/chunk.rs

use crate::coords::ChunkKey;
use crate::field::TerrainField;
use crate::generator::{MeshGenerator, Prop, PropGenerator};
use crate::mesh::ChunkMesh;

/// One materialized terrain tile: surface mesh plus decorations.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub key: ChunkKey,
    pub mesh: ChunkMesh,
    pub props: Vec<Prop>,
}

impl Chunk {
    pub fn generate(
        field: &TerrainField,
        mesh_generator: &MeshGenerator,
        prop_generator: &PropGenerator,
        key: ChunkKey,
    ) -> Self {
        Self {
            key,
            mesh: mesh_generator.generate(field, key),
            props: prop_generator.generate(field, key),
        }
    }
}
