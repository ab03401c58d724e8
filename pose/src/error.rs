// src/error.rs

use thiserror::Error;

use crate::joint::Joint;

#[derive(Debug, Error)]
pub enum PoseError {
    #[error("failed to parse pose config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read pose input: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse pose frames: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rig(#[from] RigError),
}

/// Binding a joint table against a loaded skeleton failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    #[error("skeleton has no bone named {bone:?} for joint {joint}")]
    MissingBone { joint: Joint, bone: String },
    #[error("bone name {bone:?} matches several skeleton bones: {matches:?}")]
    AmbiguousBone { bone: String, matches: Vec<String> },
    #[error("unknown joint name {0:?}")]
    UnknownJoint(String),
}
