// src/solver.rs

use std::collections::BTreeMap;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::frame::BodySample;
use crate::joint::{Joint, Side};
use crate::rotation::Rotation;

/// Local rotation per solved joint. Joints the solver could not determine are absent.
pub type SolvedPose = BTreeMap<Joint, Rotation>;

/// Turns one body's joint positions into joint rotations.
pub trait PoseSolver {
    fn solve(&self, body: &BodySample) -> SolvedPose;
}

impl<F> PoseSolver for F
where
    F: Fn(&BodySample) -> SolvedPose,
{
    fn solve(&self, body: &BodySample) -> SolvedPose {
        self(body)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverOutput {
    #[default]
    Quaternion,
    Euler,
}

/// Segments shorter than this carry no usable direction.
const MIN_SEGMENT: f32 = 1.0e-6;

/// Estimator frame: y points down and the subject's left is +x.
fn up() -> Vector3<f32> {
    Vector3::new(0.0, -1.0, 0.0)
}

/// Direction of `joint`'s segment in the rig's rest pose (T-pose), in the estimator frame.
fn rest_direction(joint: Joint) -> Vector3<f32> {
    use Joint::*;
    match joint {
        LeftUpperArm | LeftLowerArm | LeftHand => Vector3::x(),
        RightUpperArm | RightLowerArm | RightHand => -Vector3::x(),
        LeftUpperLeg | LeftLowerLeg | LeftFoot | RightUpperLeg | RightLowerLeg | RightFoot => -up(),
        Hips | Spine | Neck | Head => up(),
    }
}

/// Shortest rotation taking `rest` onto `direction`. Antiparallel vectors turn half way round
/// an axis perpendicular to `rest`.
fn swing(rest: &Vector3<f32>, direction: &Vector3<f32>) -> Option<UnitQuaternion<f32>> {
    if direction.norm() < MIN_SEGMENT {
        return None;
    }
    UnitQuaternion::rotation_between(rest, direction).or_else(|| {
        let axis = rest.cross(&Vector3::z());
        let axis = if axis.norm() < MIN_SEGMENT { rest.cross(&Vector3::x()) } else { axis };
        Some(UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(axis), std::f32::consts::PI))
    })
}

/// Geometric solver that needs nothing but joint positions.
///
/// Each joint's rotation swings its rest direction onto the observed segment. Hips only turn
/// about the vertical axis, following the line between the hip joints. Lower limbs and the neck
/// are expressed relative to the segment above them. Head, hands and feet are never solved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticSolver {
    pub output: SolverOutput,
    /// Samples below this confidence are treated as missing.
    pub min_confidence: f32,
}

impl AnalyticSolver {
    pub fn new(output: SolverOutput) -> Self {
        Self { output, min_confidence: 0.0 }
    }

    fn position(&self, body: &BodySample, joint: Joint) -> Option<Vector3<f32>> {
        body.get(joint)
            .filter(|s| s.confidence >= self.min_confidence)
            .map(|s| s.position)
    }

    /// World-space rotation of the segment starting at `joint`.
    fn segment(&self, body: &BodySample, joint: Joint) -> Option<UnitQuaternion<f32>> {
        let start = self.position(body, joint)?;
        let end = self.position(body, joint.child()?)?;
        swing(&rest_direction(joint), &(end - start))
    }

    fn hips(&self, body: &BodySample) -> Option<UnitQuaternion<f32>> {
        let left = self.position(body, Joint::LeftUpperLeg)?;
        let right = self.position(body, Joint::RightUpperLeg)?;
        let mut across = left - right;
        across.y = 0.0;
        swing(&Vector3::x(), &across)
    }

    fn world_rotation(&self, body: &BodySample, joint: Joint) -> Option<UnitQuaternion<f32>> {
        match joint {
            Joint::Hips => self.hips(body),
            _ => self.segment(body, joint),
        }
    }

    fn local_rotation(&self, body: &BodySample, joint: Joint) -> Option<UnitQuaternion<f32>> {
        let world = self.world_rotation(body, joint)?;
        let relative_to_parent = matches!(
            joint,
            Joint::Neck
                | Joint::LeftLowerArm
                | Joint::RightLowerArm
                | Joint::LeftLowerLeg
                | Joint::RightLowerLeg
        );
        if !relative_to_parent {
            return Some(world);
        }
        let parent = self.world_rotation(body, joint.parent()?)?;
        Some(parent.inverse() * world)
    }

    fn express(&self, q: &UnitQuaternion<f32>) -> Rotation {
        match self.output {
            SolverOutput::Quaternion => Rotation::from_unit_quaternion(q),
            SolverOutput::Euler => Rotation::euler_from_unit_quaternion(q),
        }
    }
}

impl PoseSolver for AnalyticSolver {
    fn solve(&self, body: &BodySample) -> SolvedPose {
        Joint::ROTATING
            .into_iter()
            .filter(|j| *j != Joint::Head)
            .filter_map(|joint| {
                let q = self.local_rotation(body, joint)?;
                Some((joint, self.express(&q)))
            })
            .collect()
    }
}

/// Mirrors a body through the sagittal plane, swapping sides. Useful when the estimator feed
/// is already mirrored like a selfie preview.
pub fn mirror_body(body: &BodySample) -> BodySample {
    body.iter()
        .map(|(joint, sample)| {
            let mut sample = *sample;
            sample.position.x = -sample.position.x;
            let joint = match joint.side() {
                Side::Center => joint,
                _ => joint.mirrored(),
            };
            (joint, sample)
        })
        .collect()
}
