// src/frame.rs

use std::collections::BTreeMap;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::PoseError;
use crate::joint::Joint;
use crate::solver::mirror_body;

pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    pub position: Vector3<f32>,
    pub confidence: f32,
}

impl JointSample {
    pub fn new(position: Vector3<f32>, confidence: f32) -> Self {
        Self { position, confidence }
    }
}

/// One tracked body: whichever joints the estimator saw this frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodySample(BTreeMap<Joint, JointSample>);

impl BodySample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: Joint, sample: JointSample) -> Option<JointSample> {
        self.0.insert(joint, sample)
    }

    pub fn get(&self, joint: Joint) -> Option<&JointSample> {
        self.0.get(&joint)
    }

    pub fn position(&self, joint: Joint) -> Option<Vector3<f32>> {
        self.0.get(&joint).map(|s| s.position)
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.0.contains_key(&joint)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, &JointSample)> {
        self.0.iter().map(|(j, s)| (*j, s))
    }

    /// Derives joints from a full set of estimator landmarks, indexed by [`LandmarkIndex`].
    ///
    /// Landmarks below `min_visibility` are ignored, and any joint that needs one of them is
    /// left out. Midpoint joints take the lower of their two confidences.
    pub fn from_landmarks(landmarks: &[Landmark], min_visibility: f32) -> Self {
        let visible = |index: LandmarkIndex| {
            landmarks
                .get(index as usize)
                .filter(|l| l.visibility >= min_visibility)
        };
        let single = |index: LandmarkIndex| {
            visible(index).map(|l| JointSample::new(l.position(), l.visibility))
        };
        let midpoint = |a: LandmarkIndex, b: LandmarkIndex| {
            let (a, b) = (visible(a)?, visible(b)?);
            Some(JointSample::new(
                (a.position() + b.position()) * 0.5,
                a.visibility.min(b.visibility),
            ))
        };

        use LandmarkIndex as L;
        let derived = [
            (Joint::Hips, midpoint(L::LeftHip, L::RightHip)),
            (Joint::Spine, midpoint(L::LeftHip, L::RightHip)),
            (Joint::Neck, midpoint(L::LeftShoulder, L::RightShoulder)),
            (Joint::Head, single(L::Nose)),
            (Joint::LeftUpperArm, single(L::LeftShoulder)),
            (Joint::LeftLowerArm, single(L::LeftElbow)),
            (Joint::LeftHand, single(L::LeftWrist)),
            (Joint::RightUpperArm, single(L::RightShoulder)),
            (Joint::RightLowerArm, single(L::RightElbow)),
            (Joint::RightHand, single(L::RightWrist)),
            (Joint::LeftUpperLeg, single(L::LeftHip)),
            (Joint::LeftLowerLeg, single(L::LeftKnee)),
            (Joint::LeftFoot, single(L::LeftAnkle)),
            (Joint::RightUpperLeg, single(L::RightHip)),
            (Joint::RightLowerLeg, single(L::RightKnee)),
            (Joint::RightFoot, single(L::RightAnkle)),
        ];

        derived
            .into_iter()
            .filter_map(|(joint, sample)| sample.map(|s| (joint, s)))
            .collect()
    }
}

impl FromIterator<(Joint, JointSample)> for BodySample {
    fn from_iter<I: IntoIterator<Item = (Joint, JointSample)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything the estimator reported for one camera frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub bodies: Vec<BodySample>,
}

impl PoseFrame {
    pub fn single(body: BodySample) -> Self {
        Self { bodies: vec![body] }
    }

    pub fn from_landmarks(bodies: &[Vec<Landmark>], min_visibility: f32) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|landmarks| BodySample::from_landmarks(landmarks, min_visibility))
                .collect(),
        }
    }

    /// The body that drives the avatar.
    pub fn primary(&self) -> Option<&BodySample> {
        self.bodies.first()
    }

    /// Every body flipped left for right, for feeds that arrive mirrored like a selfie preview.
    pub fn mirrored(&self) -> Self {
        Self {
            bodies: self.bodies.iter().map(mirror_body).collect(),
        }
    }

    /// Parses a recorded sequence. `null` entries are frames where the estimator gave nothing.
    pub fn parse_sequence(text: &str) -> Result<Vec<Option<PoseFrame>>, PoseError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load_sequence(path: impl AsRef<Path>) -> Result<Vec<Option<PoseFrame>>, PoseError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse_sequence(&text)
    }
}

/// A world-space landmark in meters, relative to the hip center. y points down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Slot of each landmark in the estimator's 33-point output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;
}
