// src/retarget.rs

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::frame::PoseFrame;
use crate::skeleton::{BoneId, BoneMap};
use crate::rotation::Rotation;
use crate::solver::PoseSolver;

/// One bone write for the rig.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneRotation {
    pub bone: BoneId,
    pub bone_name: String,
    pub rotation: Rotation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetargetMode {
    #[default]
    Idle,
    Tracking,
}

/// Turns estimator frames into rig bone writes.
///
/// A frame with at least one body puts the retargeter in `Tracking`; anything else is `Idle`
/// and produces no writes, so the rig holds its last pose. Only the first body is used.
pub struct PoseRetargeter<S> {
    solver: S,
    bones: BoneMap,
    calibration: Calibration,
    mode: RetargetMode,
    last: BTreeMap<BoneId, Rotation>,
}

impl<S: PoseSolver> PoseRetargeter<S> {
    pub fn new(solver: S, bones: BoneMap, calibration: Calibration) -> Self {
        Self {
            solver,
            bones,
            calibration,
            mode: RetargetMode::Idle,
            last: BTreeMap::new(),
        }
    }

    pub fn retarget(&mut self, frame: Option<&PoseFrame>) -> Vec<BoneRotation> {
        let body = frame.and_then(|f| {
            if f.bodies.len() > 1 {
                warn!("frame has {} bodies; tracking the first", f.bodies.len());
            }
            f.primary()
        });

        let Some(body) = body else {
            self.set_mode(RetargetMode::Idle);
            return Vec::new();
        };
        self.set_mode(RetargetMode::Tracking);

        let solved = self.solver.solve(body);
        let mut writes = Vec::with_capacity(solved.len());

        for (joint, rotation) in solved {
            let target = self.calibration.target(joint);
            let (Some(bone), Some(bone_name)) = (self.bones.bone(target), self.bones.bone_name(target))
            else {
                debug!("no bone bound for {target}, dropping its rotation");
                continue;
            };
            let rotation = rotation.scaled(self.calibration.factors(joint));
            self.last.insert(bone, rotation);
            writes.push(BoneRotation { bone, bone_name: bone_name.to_string(), rotation });
        }

        writes
    }

    fn set_mode(&mut self, mode: RetargetMode) {
        if self.mode != mode {
            info!("pose retargeting {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn mode(&self) -> RetargetMode {
        self.mode
    }

    /// Most recent rotation written to `bone`, if any.
    pub fn last_rotation(&self, bone: BoneId) -> Option<Rotation> {
        self.last.get(&bone).copied()
    }

    pub fn bones(&self) -> &BoneMap {
        &self.bones
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::frame::{BodySample, JointSample};
    use crate::joint::Joint;
    use crate::skeleton::{default_bone_table, Rig};
    use crate::solver::{AnalyticSolver, SolvedPose};
    use nalgebra::Vector3;

    fn rig() -> Rig {
        Rig::new(default_bone_table().values().map(|b| format!("mixamorig:{b}")))
    }

    fn retargeter<S: PoseSolver>(solver: S) -> (Rig, PoseRetargeter<S>) {
        let rig = rig();
        let bones = rig.bind(default_bone_table()).unwrap();
        (rig, PoseRetargeter::new(solver, bones, Calibration::default()))
    }

    fn body() -> BodySample {
        [(Joint::Hips, JointSample::new(Vector3::zeros(), 1.0))].into_iter().collect()
    }

    fn fixed(pose: SolvedPose) -> impl Fn(&BodySample) -> SolvedPose {
        move |_: &BodySample| pose.clone()
    }

    const ARM: Rotation = Rotation::Quaternion { x: 0.1, y: 0.2, z: 0.3, w: 0.927 };

    #[test]
    fn left_arm_drives_right_bone_with_limb_signs() {
        let _ = env_logger::builder().is_test(true).try_init();

        let solver = fixed([(Joint::LeftUpperArm, ARM)].into_iter().collect());
        let (_, mut retargeter) = retargeter(solver);
        let writes = retargeter.retarget(Some(&PoseFrame::single(body())));

        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].bone_name, "mixamorig:RightArm");
        assert_eq!(writes[0].rotation, Rotation::Quaternion { x: 0.1, y: -0.2, z: 0.3, w: 0.927 });
        assert_eq!(retargeter.mode(), RetargetMode::Tracking);
    }

    #[test]
    fn axial_joints_flip_y_and_z() {
        let solver = fixed(
            [(Joint::Spine, Rotation::Euler { x: 0.4, y: 0.5, z: 0.6 })].into_iter().collect(),
        );
        let (_, mut retargeter) = retargeter(solver);
        let writes = retargeter.retarget(Some(&PoseFrame::single(body())));

        assert_eq!(writes[0].bone_name, "mixamorig:Spine");
        assert_eq!(writes[0].rotation, Rotation::Euler { x: 0.4, y: -0.5, z: -0.6 });
    }

    #[test]
    fn every_limb_lands_on_the_opposite_side() {
        let pose: SolvedPose = Joint::ROTATING.into_iter().map(|j| (j, Rotation::IDENTITY)).collect();
        let (_, mut retargeter) = retargeter(fixed(pose));
        let writes = retargeter.retarget(Some(&PoseFrame::single(body())));
        assert_eq!(writes.len(), 12);

        let bone = |joint| retargeter.bones().bone_name(joint).unwrap().to_string();
        let names: Vec<&str> = writes.iter().map(|w| w.bone_name.as_str()).collect();
        // solver order is Joint order; each limb joint writes to its mirror's bone
        assert_eq!(names[4], bone(Joint::RightUpperArm));
        assert_eq!(names[5], bone(Joint::RightLowerArm));
        assert_eq!(names[6], bone(Joint::LeftUpperArm));
        assert_eq!(names[8], bone(Joint::RightUpperLeg));
        assert_eq!(names[11], bone(Joint::LeftLowerLeg));
    }

    #[test]
    fn empty_and_missing_frames_are_idle() {
        let (_, mut retargeter) = retargeter(fixed([(Joint::Spine, ARM)].into_iter().collect()));

        assert!(retargeter.retarget(Some(&PoseFrame::default())).is_empty());
        assert_eq!(retargeter.mode(), RetargetMode::Idle);
        assert!(retargeter.retarget(None).is_empty());

        assert_eq!(retargeter.retarget(Some(&PoseFrame::single(body()))).len(), 1);
        assert_eq!(retargeter.mode(), RetargetMode::Tracking);
        assert!(retargeter.retarget(None).is_empty());
        assert_eq!(retargeter.mode(), RetargetMode::Idle);
    }

    #[test]
    fn missing_joint_keeps_previous_rotation() {
        let full: SolvedPose = [(Joint::LeftUpperArm, ARM), (Joint::Neck, ARM)].into_iter().collect();
        let partial: SolvedPose = [(Joint::Neck, ARM)].into_iter().collect();
        let arm_lost = Cell::new(false);
        let solver = |_: &BodySample| -> SolvedPose {
            if arm_lost.get() { partial.clone() } else { full.clone() }
        };
        let (mut rig, mut retargeter) = retargeter(solver);
        let frame = PoseFrame::single(body());
        let arm = retargeter.bones().bone(Joint::RightUpperArm).unwrap();

        rig.apply(&retargeter.retarget(Some(&frame)));
        let held = rig.rotation(arm).unwrap();
        assert_ne!(held, Rotation::IDENTITY);

        arm_lost.set(true);
        let writes = retargeter.retarget(Some(&frame));
        assert_eq!(writes.len(), 1);
        assert!(writes.iter().all(|w| w.bone != arm));
        rig.apply(&writes);
        assert_eq!(rig.rotation(arm), Some(held));
        assert_eq!(retargeter.last_rotation(arm), Some(held));
    }

    #[test]
    fn extra_bodies_are_ignored() {
        let seen = Cell::new(0usize);
        let solver = |b: &BodySample| -> SolvedPose {
            seen.set(b.len());
            SolvedPose::new()
        };
        let (_, mut retargeter) = retargeter(solver);
        let first = body();
        let mut second = body();
        second.insert(Joint::Head, JointSample::new(Vector3::zeros(), 1.0));
        retargeter.retarget(Some(&PoseFrame { bodies: vec![first, second] }));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn unbound_target_is_dropped() {
        let rig = Rig::new(["Hips", "Spine"]);
        let table: BTreeMap<Joint, String> = default_bone_table()
            .iter()
            .filter(|(j, _)| matches!(**j, Joint::Hips | Joint::Spine))
            .map(|(j, b)| (*j, b.clone()))
            .collect();
        let bones = rig.bind(&table).unwrap();
        let pose: SolvedPose = [(Joint::Spine, ARM), (Joint::LeftUpperArm, ARM)].into_iter().collect();
        let mut retargeter = PoseRetargeter::new(fixed(pose), bones, Calibration::default());

        let writes = retargeter.retarget(Some(&PoseFrame::single(body())));
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].bone_name, "Spine");
    }

    #[test]
    fn analytic_solver_end_to_end() {
        let (mut rig, mut retargeter) = retargeter(AnalyticSolver::default());
        let body: BodySample = [
            (Joint::LeftUpperArm, JointSample::new(Vector3::new(0.2, -0.5, 0.0), 1.0)),
            (Joint::LeftLowerArm, JointSample::new(Vector3::new(0.2, -0.8, 0.0), 1.0)),
        ]
        .into_iter()
        .collect();
        let writes = retargeter.retarget(Some(&PoseFrame::single(body)));
        assert_eq!(writes.len(), 1);
        rig.apply(&writes);
        assert_ne!(rig.rotation_by_name("mixamorig:RightArm"), Some(Rotation::IDENTITY));
        assert_eq!(rig.rotation_by_name("mixamorig:LeftArm"), Some(Rotation::IDENTITY));
    }
}
