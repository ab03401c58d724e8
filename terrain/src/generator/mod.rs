mod mesh;
mod props;

pub use mesh::MeshGenerator;
pub use props::{
    chunk_seed,
    Prop,
    PropGenerator,
    PropKind,
};

#[cfg(test)]
mod tests;
