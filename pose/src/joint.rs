// src/joint.rs

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// Fixed joint vocabulary shared by the estimator, the solver and the rig.
///
/// A joint's sample is the position of its origin: `LeftUpperArm` sits at the left shoulder,
/// `LeftLowerArm` at the left elbow. Hands and feet are end effectors. They only give the
/// direction of the segment above them and never carry a rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Joint {
    Hips,
    Spine,
    Neck,
    Head,
    LeftUpperArm,
    LeftLowerArm,
    LeftHand,
    RightUpperArm,
    RightLowerArm,
    RightHand,
    LeftUpperLeg,
    LeftLowerLeg,
    LeftFoot,
    RightUpperLeg,
    RightLowerLeg,
    RightFoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Hips, spine, neck and head.
    Axial,
    /// Upper and lower arms and legs.
    Limb,
    /// Hands and feet.
    EndEffector,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Center,
    Left,
    Right,
}

impl Joint {
    pub const ALL: [Joint; 16] = [
        Joint::Hips,
        Joint::Spine,
        Joint::Neck,
        Joint::Head,
        Joint::LeftUpperArm,
        Joint::LeftLowerArm,
        Joint::LeftHand,
        Joint::RightUpperArm,
        Joint::RightLowerArm,
        Joint::RightHand,
        Joint::LeftUpperLeg,
        Joint::LeftLowerLeg,
        Joint::LeftFoot,
        Joint::RightUpperLeg,
        Joint::RightLowerLeg,
        Joint::RightFoot,
    ];

    /// Joints that receive a rotation.
    pub const ROTATING: [Joint; 12] = [
        Joint::Hips,
        Joint::Spine,
        Joint::Neck,
        Joint::Head,
        Joint::LeftUpperArm,
        Joint::LeftLowerArm,
        Joint::RightUpperArm,
        Joint::RightLowerArm,
        Joint::LeftUpperLeg,
        Joint::LeftLowerLeg,
        Joint::RightUpperLeg,
        Joint::RightLowerLeg,
    ];

    pub fn region(self) -> Region {
        use Joint::*;
        match self {
            Hips | Spine | Neck | Head => Region::Axial,
            LeftHand | RightHand | LeftFoot | RightFoot => Region::EndEffector,
            _ => Region::Limb,
        }
    }

    pub fn side(self) -> Side {
        use Joint::*;
        match self {
            Hips | Spine | Neck | Head => Side::Center,
            LeftUpperArm | LeftLowerArm | LeftHand | LeftUpperLeg | LeftLowerLeg | LeftFoot => Side::Left,
            _ => Side::Right,
        }
    }

    /// Same joint on the other side of the body. Axial joints map to themselves.
    pub fn mirrored(self) -> Joint {
        use Joint::*;
        match self {
            LeftUpperArm => RightUpperArm,
            LeftLowerArm => RightLowerArm,
            LeftHand => RightHand,
            RightUpperArm => LeftUpperArm,
            RightLowerArm => LeftLowerArm,
            RightHand => LeftHand,
            LeftUpperLeg => RightUpperLeg,
            LeftLowerLeg => RightLowerLeg,
            LeftFoot => RightFoot,
            RightUpperLeg => LeftUpperLeg,
            RightLowerLeg => LeftLowerLeg,
            RightFoot => LeftFoot,
            axial => axial,
        }
    }

    /// The joint at the far end of this joint's segment.
    pub fn child(self) -> Option<Joint> {
        use Joint::*;
        match self {
            Hips => Some(Spine),
            Spine => Some(Neck),
            Neck => Some(Head),
            LeftUpperArm => Some(LeftLowerArm),
            LeftLowerArm => Some(LeftHand),
            RightUpperArm => Some(RightLowerArm),
            RightLowerArm => Some(RightHand),
            LeftUpperLeg => Some(LeftLowerLeg),
            LeftLowerLeg => Some(LeftFoot),
            RightUpperLeg => Some(RightLowerLeg),
            RightLowerLeg => Some(RightFoot),
            Head | LeftHand | RightHand | LeftFoot | RightFoot => None,
        }
    }

    /// The segment whose rotation this joint's rotation is relative to.
    pub fn parent(self) -> Option<Joint> {
        use Joint::*;
        match self {
            Hips => None,
            Spine => Some(Hips),
            Neck => Some(Spine),
            Head => Some(Neck),
            LeftUpperArm | RightUpperArm => Some(Spine),
            LeftUpperLeg | RightUpperLeg => Some(Hips),
            other => Self::ALL.iter().copied().find(|j| j.child() == Some(other)),
        }
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Joint {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::ALL
            .into_iter()
            .find(|joint| joint.to_string() == s)
            .ok_or_else(|| RigError::UnknownJoint(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirroring_is_an_involution() {
        for joint in Joint::ALL {
            assert_eq!(joint.mirrored().mirrored(), joint);
            assert_eq!(joint.mirrored().region(), joint.region());
        }
        assert_eq!(Joint::LeftUpperArm.mirrored(), Joint::RightUpperArm);
        assert_eq!(Joint::Spine.mirrored(), Joint::Spine);
    }

    #[test]
    fn sides_swap_under_mirroring() {
        for joint in Joint::ALL {
            let expected = match joint.side() {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
                Side::Center => Side::Center,
            };
            assert_eq!(joint.mirrored().side(), expected);
        }
    }

    #[test]
    fn rotating_joints_exclude_end_effectors() {
        assert!(Joint::ROTATING.iter().all(|j| j.region() != Region::EndEffector));
        assert_eq!(
            Joint::ALL.iter().filter(|j| j.region() != Region::EndEffector).count(),
            Joint::ROTATING.len()
        );
    }

    #[test]
    fn lower_limbs_hang_off_upper_limbs() {
        assert_eq!(Joint::LeftLowerArm.parent(), Some(Joint::LeftUpperArm));
        assert_eq!(Joint::RightLowerLeg.parent(), Some(Joint::RightUpperLeg));
        assert_eq!(Joint::LeftFoot.parent(), Some(Joint::LeftLowerLeg));
        assert_eq!(Joint::Hips.parent(), None);
    }

    #[test]
    fn names_parse_back() {
        for joint in Joint::ALL {
            assert_eq!(joint.to_string().parse::<Joint>(), Ok(joint));
        }
        assert_eq!(
            "LeftArm".parse::<Joint>(),
            Err(RigError::UnknownJoint("LeftArm".to_string()))
        );
    }
}
