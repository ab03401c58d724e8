// src/world.rs

use std::collections::HashMap;

use log::debug;

use crate::chunk::Chunk;
use crate::config::TerrainConfig;
use crate::coords::ChunkKey;
use crate::error::TerrainError;
use crate::field::TerrainField;
use crate::generator::{MeshGenerator, PropGenerator};
use crate::streamer::{ChunkDelta, ChunkStreamer};

/// Owns the materialized chunks around the viewer.
///
/// Feeds viewer positions to a [`ChunkStreamer`], builds chunks as they enter the window and
/// drops them as they leave.
pub struct TerrainWorld {
    field: TerrainField,
    mesh_generator: MeshGenerator,
    prop_generator: PropGenerator,
    streamer: ChunkStreamer,
    chunks: HashMap<ChunkKey, Chunk>,
}

impl TerrainWorld {
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        let mesh_generator = MeshGenerator::from_config(&config.chunk);
        let prop_generator = PropGenerator::new(config.chunk.size, config.props.clone());
        let streamer = ChunkStreamer::new(config.chunk.size, config.chunk.radius);
        let field = TerrainField::new(config)?;

        Ok(Self {
            field,
            mesh_generator,
            prop_generator,
            streamer,
            chunks: HashMap::new(),
        })
    }

    pub fn update(&mut self, viewer_x: f32, viewer_z: f32) -> ChunkDelta {
        let delta = self.streamer.update(viewer_x, viewer_z);

        for key in &delta.removed {
            self.chunks.remove(key);
        }
        for &key in &delta.added {
            let chunk = Chunk::generate(&self.field, &self.mesh_generator, &self.prop_generator, key);
            self.chunks.insert(key, chunk);
        }

        if !delta.is_empty() {
            debug!("{} chunks resident", self.chunks.len());
        }
        delta
    }

    pub fn field(&self) -> &TerrainField {
        &self.field
    }

    pub fn streamer(&self) -> &ChunkStreamer {
        &self.streamer
    }

    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Ground height under a world position, for keeping the avatar on the surface.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.field.sample_height(x, z)
    }
}
