// src/lib.rs

//! Maps estimated body landmarks onto a humanoid rig.
//!
//! The landmark estimator and the pose solver are collaborators behind data types and the
//! [`PoseSolver`] trait. This crate owns what happens between them and the skeleton: axis
//! correction, mirrored limb swapping and the idle/missing-joint policy.

pub mod calibration;
pub mod error;
pub mod frame;
pub mod joint;
pub mod retarget;
pub mod rotation;
pub mod skeleton;
pub mod solver;

pub use calibration::{AxisFactors, Calibration};
pub use error::{PoseError, RigError};
pub use frame::{BodySample, JointSample, Landmark, LandmarkIndex, PoseFrame, DEFAULT_MIN_VISIBILITY};
pub use joint::{Joint, Region, Side};
pub use retarget::{BoneRotation, PoseRetargeter, RetargetMode};
pub use rotation::Rotation;
pub use skeleton::{default_bone_table, BoneId, BoneMap, Rig, RigConfig};
pub use solver::{mirror_body, AnalyticSolver, PoseSolver, SolvedPose, SolverOutput};
