// generator/src/session.rs

use log::{debug, info};
use pathwalk_pose::{PoseFrame, PoseRetargeter, PoseSolver, RetargetMode, Rig};
use pathwalk_terrain::{ChunkDelta, TerrainField, TerrainWorld, WorldPoint};

/// Where a viewer walking the road stands after covering `distance` world units.
/// The walk heads towards negative z.
pub fn point_on_path(field: &TerrainField, distance: f32) -> WorldPoint {
    let z = -distance;
    WorldPoint::new(field.path_center_x(z), z)
}

#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub viewer: WorldPoint,
    pub ground: f32,
    pub mode: RetargetMode,
    pub bone_writes: usize,
    pub delta: ChunkDelta,
}

/// One frame of the host loop: pose first, then terrain.
pub struct Session<S> {
    world: TerrainWorld,
    rig: Rig,
    retargeter: PoseRetargeter<S>,
    ticks: u64,
}

impl<S: PoseSolver> Session<S> {
    pub fn new(world: TerrainWorld, rig: Rig, retargeter: PoseRetargeter<S>) -> Self {
        Self { world, rig, retargeter, ticks: 0 }
    }

    pub fn tick(&mut self, viewer: WorldPoint, frame: Option<&PoseFrame>) -> TickReport {
        let writes = self.retargeter.retarget(frame);
        self.rig.apply(&writes);
        for write in &writes {
            debug!("{} <- {:?}", write.bone_name, write.rotation);
        }

        let delta = self.world.update(viewer.x, viewer.z);
        if !delta.is_empty() {
            info!(
                "tick {}: +{} -{} chunks around ({:.1}, {:.1})",
                self.ticks,
                delta.added.len(),
                delta.removed.len(),
                viewer.x,
                viewer.z
            );
        }

        let report = TickReport {
            tick: self.ticks,
            viewer,
            ground: self.world.height_at(viewer.x, viewer.z),
            mode: self.retargeter.mode(),
            bone_writes: writes.len(),
            delta,
        };
        self.ticks += 1;
        report
    }

    pub fn world(&self) -> &TerrainWorld {
        &self.world
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn retargeter(&self) -> &PoseRetargeter<S> {
        &self.retargeter
    }
}
