// src/prelude.rs
//! A convenient prelude re-exporting common terrain types.

pub use crate::chunk::Chunk;
pub use crate::color::Rgb;
pub use crate::config::{ChunkConfig, NoiseConfig, PathConfig, PropConfig, TerrainConfig};
pub use crate::coords::{ChunkKey, WorldPoint};
pub use crate::field::{HeightSample, TerrainField};
pub use crate::generator::{MeshGenerator, Prop, PropGenerator, PropKind};
pub use crate::mesh::ChunkMesh;
pub use crate::streamer::{ChunkDelta, ChunkStreamer};
pub use crate::world::TerrainWorld;
