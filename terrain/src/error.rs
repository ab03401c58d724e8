// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse terrain config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read terrain config: {0}")]
    Io(#[from] std::io::Error),
}
