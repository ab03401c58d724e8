// src/streamer.rs

use std::collections::BTreeSet;

use log::info;

use crate::coords::{ChunkKey, WorldPoint};

/// Keys that entered and left the active window during one update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkDelta {
    pub added: Vec<ChunkKey>,
    pub removed: Vec<ChunkKey>,
}

impl ChunkDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// All keys in the `(2 * radius + 1)^2` square around `center`. A center too close to the
/// edge of the key space is moved inward first.
pub fn window(center: ChunkKey, radius: u32) -> BTreeSet<ChunkKey> {
    let center = center.clamped(radius);
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let mut keys = BTreeSet::new();
    for x in (center.x - r)..=(center.x + r) {
        for z in (center.z - r)..=(center.z + r) {
            keys.insert(ChunkKey { x, z });
        }
    }
    keys
}

/// Tracks which chunks should exist around the viewer.
///
/// Only recomputes the window when the viewer's chunk changes, and reports the difference
/// so the caller can build and drop chunks incrementally.
#[derive(Clone, Debug)]
pub struct ChunkStreamer {
    size: f32,
    radius: u32,
    last_center: Option<ChunkKey>,
    active: BTreeSet<ChunkKey>,
}

impl ChunkStreamer {
    pub fn new(size: f32, radius: u32) -> Self {
        Self {
            size,
            radius,
            last_center: None,
            active: BTreeSet::new(),
        }
    }

    pub fn update(&mut self, viewer_x: f32, viewer_z: f32) -> ChunkDelta {
        let center = ChunkKey::containing(WorldPoint::new(viewer_x, viewer_z), self.size)
            .clamped(self.radius);
        if self.last_center == Some(center) {
            return ChunkDelta::default();
        }

        let next = window(center, self.radius);
        let delta = ChunkDelta {
            added: next.difference(&self.active).copied().collect(),
            removed: self.active.difference(&next).copied().collect(),
        };

        info!(
            "Viewer entered chunk {}: +{} / -{} chunks",
            center,
            delta.added.len(),
            delta.removed.len()
        );

        self.active = next;
        self.last_center = Some(center);
        delta
    }

    pub fn active(&self) -> &BTreeSet<ChunkKey> {
        &self.active
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.active.contains(&key)
    }

    pub fn center(&self) -> Option<ChunkKey> {
        self.last_center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn chunk_size(&self) -> f32 {
        self.size
    }

    /// Forget everything; the next update adds the full window again.
    pub fn reset(&mut self) {
        self.last_center = None;
        self.active.clear();
    }
}
