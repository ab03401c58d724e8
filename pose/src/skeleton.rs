// src/skeleton.rs

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::joint::Joint;
use crate::retarget::BoneRotation;
use crate::rotation::Rotation;

static DEFAULT_BONE_TABLE: OnceCell<BTreeMap<Joint, String>> = OnceCell::new();

/// Mixamo bone names for every rotating joint.
pub fn default_bone_table() -> &'static BTreeMap<Joint, String> {
    DEFAULT_BONE_TABLE.get_or_init(|| {
        [
            (Joint::Hips, "Hips"),
            (Joint::Spine, "Spine"),
            (Joint::Neck, "Neck"),
            (Joint::Head, "Head"),
            (Joint::LeftUpperArm, "LeftArm"),
            (Joint::LeftLowerArm, "LeftForeArm"),
            (Joint::RightUpperArm, "RightArm"),
            (Joint::RightLowerArm, "RightForeArm"),
            (Joint::LeftUpperLeg, "LeftUpLeg"),
            (Joint::LeftLowerLeg, "LeftLeg"),
            (Joint::RightUpperLeg, "RightUpLeg"),
            (Joint::RightLowerLeg, "RightLeg"),
        ]
        .into_iter()
        .map(|(joint, bone)| (joint, bone.to_string()))
        .collect()
    })
}

/// `mixamorig:LeftArm` and `LeftArm` name the same bone.
fn strip_namespace(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// Index of a bone in its rig's bone list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoneId(pub usize);

/// Joint to bone lookup, resolved once against a concrete skeleton.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneMap {
    bones: BTreeMap<Joint, (BoneId, String)>,
}

impl BoneMap {
    /// Resolves every entry of `table` against `bone_names`. Fails on the first joint whose
    /// bone is missing or matches more than one skeleton bone.
    pub fn bind<S: AsRef<str>>(
        bone_names: &[S],
        table: &BTreeMap<Joint, String>,
    ) -> Result<Self, RigError> {
        let mut bones = BTreeMap::new();

        for (&joint, wanted) in table {
            let wanted_bare = strip_namespace(wanted);
            let matches: Vec<(usize, &str)> = bone_names
                .iter()
                .map(|name| name.as_ref())
                .enumerate()
                .filter(|(_, name)| strip_namespace(name) == wanted_bare)
                .collect();

            match matches.as_slice() {
                [] => {
                    return Err(RigError::MissingBone { joint, bone: wanted.clone() });
                }
                [(index, name)] => {
                    bones.insert(joint, (BoneId(*index), name.to_string()));
                }
                _ => {
                    return Err(RigError::AmbiguousBone {
                        bone: wanted.clone(),
                        matches: matches.iter().map(|(_, name)| name.to_string()).collect(),
                    });
                }
            }
        }

        debug!("bound {} joints to skeleton bones", bones.len());
        Ok(Self { bones })
    }

    pub fn bind_default<S: AsRef<str>>(bone_names: &[S]) -> Result<Self, RigError> {
        Self::bind(bone_names, default_bone_table())
    }

    pub fn bone(&self, joint: Joint) -> Option<BoneId> {
        self.bones.get(&joint).map(|(id, _)| *id)
    }

    /// Skeleton name of the bone bound to `joint`, namespace included.
    pub fn bone_name(&self, joint: Joint) -> Option<&str> {
        self.bones.get(&joint).map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Overrides for the joint to bone table, keyed by joint name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub bones: BTreeMap<String, String>,
}

impl RigConfig {
    /// The default table with this config's overrides applied.
    pub fn table(&self) -> Result<BTreeMap<Joint, String>, RigError> {
        let mut table = default_bone_table().clone();
        for (joint, bone) in &self.bones {
            table.insert(joint.parse()?, bone.clone());
        }
        Ok(table)
    }
}

/// A skeleton's bones and their current local rotations.
#[derive(Clone, Debug)]
pub struct Rig {
    bone_names: Vec<String>,
    rotations: Vec<Rotation>,
}

impl Rig {
    /// Every bone starts at rest.
    pub fn new<S: Into<String>>(bone_names: impl IntoIterator<Item = S>) -> Self {
        let bone_names: Vec<String> = bone_names.into_iter().map(Into::into).collect();
        let rotations = vec![Rotation::IDENTITY; bone_names.len()];
        Self { bone_names, rotations }
    }

    /// A rig whose bones are exactly the default table's names.
    pub fn mixamo() -> Self {
        Self::new(default_bone_table().values().cloned())
    }

    pub fn bone_names(&self) -> &[String] {
        &self.bone_names
    }

    pub fn bind(&self, table: &BTreeMap<Joint, String>) -> Result<BoneMap, RigError> {
        BoneMap::bind(&self.bone_names, table)
    }

    /// Sets each bone's local rotation. Bones not listed keep theirs.
    pub fn apply(&mut self, rotations: &[BoneRotation]) {
        for write in rotations {
            if let Some(slot) = self.rotations.get_mut(write.bone.0) {
                *slot = write.rotation;
            }
        }
    }

    pub fn rotation(&self, bone: BoneId) -> Option<Rotation> {
        self.rotations.get(bone.0).copied()
    }

    pub fn rotation_by_name(&self, name: &str) -> Option<Rotation> {
        let index = self.bone_names.iter().position(|b| b == name)?;
        self.rotations.get(index).copied()
    }

    pub fn reset(&mut self) {
        self.rotations.fill(Rotation::IDENTITY);
    }
}
