// src/rotation.rs

use nalgebra::{Quaternion, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::calibration::AxisFactors;

/// A local joint rotation in whichever form the solver produced it.
///
/// Euler angles are radians about x, then y, then z (nalgebra's roll/pitch/yaw convention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    Quaternion { x: f32, y: f32, z: f32, w: f32 },
    Euler { x: f32, y: f32, z: f32 },
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation::Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn from_unit_quaternion(q: &UnitQuaternion<f32>) -> Self {
        Rotation::Quaternion { x: q.i, y: q.j, z: q.k, w: q.w }
    }

    pub fn euler_from_unit_quaternion(q: &UnitQuaternion<f32>) -> Self {
        let (x, y, z) = q.euler_angles();
        Rotation::Euler { x, y, z }
    }

    /// Multiplies the vector components by `factors`. A quaternion keeps its `w`, so the
    /// result is not renormalized; the rig applies it as given.
    pub fn scaled(self, factors: AxisFactors) -> Self {
        match self {
            Rotation::Quaternion { x, y, z, w } => Rotation::Quaternion {
                x: x * factors.x,
                y: y * factors.y,
                z: z * factors.z,
                w,
            },
            Rotation::Euler { x, y, z } => Rotation::Euler {
                x: x * factors.x,
                y: y * factors.y,
                z: z * factors.z,
            },
        }
    }

    /// Vector part, the components [`Rotation::scaled`] acts on.
    pub fn xyz(&self) -> [f32; 3] {
        match *self {
            Rotation::Quaternion { x, y, z, .. } | Rotation::Euler { x, y, z } => [x, y, z],
        }
    }

    pub fn to_unit_quaternion(&self) -> UnitQuaternion<f32> {
        match *self {
            Rotation::Quaternion { x, y, z, w } => {
                UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
            }
            Rotation::Euler { x, y, z } => UnitQuaternion::from_euler_angles(x, y, z),
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::IDENTITY
    }
}
