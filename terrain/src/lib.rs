// src/lib.rs

//! Infinite chunked terrain with a flattened, winding road.
//!
//! [`TerrainField`] is a pure function of world coordinates. Chunks sample it on demand and
//! [`ChunkStreamer`] decides which chunks exist around the viewer.

pub mod chunk;
pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod field;
pub mod generator;
pub mod mesh;
pub mod prelude;
pub mod streamer;
pub mod world;

pub use chunk::Chunk;
pub use color::Rgb;
pub use config::TerrainConfig;
pub use coords::{ChunkKey, WorldPoint};
pub use error::TerrainError;
pub use field::{HeightSample, TerrainField};
pub use streamer::{ChunkDelta, ChunkStreamer};
pub use world::TerrainWorld;
