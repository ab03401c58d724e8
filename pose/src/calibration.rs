// src/calibration.rs

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PoseError;
use crate::joint::{Joint, Region};

/// Per-axis sign (or gain) applied to a rotation's vector part.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisFactors {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AxisFactors {
    pub const IDENTITY: AxisFactors = AxisFactors { x: 1.0, y: 1.0, z: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Corrects the estimator's camera-facing frame into the rig's frame.
///
/// The estimator sees the user from the front, so left and right are mirrored relative to an
/// avatar facing away from the camera. Axial joints flip y and z; limbs flip y only and swap
/// sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub axial: AxisFactors,
    pub limb: AxisFactors,
    pub swap_sides: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            axial: AxisFactors::new(1.0, -1.0, -1.0),
            limb: AxisFactors::new(1.0, -1.0, 1.0),
            swap_sides: true,
        }
    }
}

impl Calibration {
    pub fn from_toml_str(text: &str) -> Result<Self, PoseError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PoseError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Factors for a solved joint. End effectors never carry a rotation and get identity.
    pub fn factors(&self, joint: Joint) -> AxisFactors {
        match joint.region() {
            Region::Axial => self.axial,
            Region::Limb => self.limb,
            Region::EndEffector => AxisFactors::IDENTITY,
        }
    }

    /// The rig joint that receives `joint`'s rotation.
    pub fn target(&self, joint: Joint) -> Joint {
        if self.swap_sides && joint.region() == Region::Limb {
            joint.mirrored()
        } else {
            joint
        }
    }
}
