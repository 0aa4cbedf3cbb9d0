use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::keypoint::{Keypoint, KEYPOINT_COUNT};

/// One frame of hand-tracking data, as reported by a [`crate::pose_sources::PoseSource`].
///
/// The arrays are parallel and indexed by [`Keypoint::index`]. A well formed snapshot has exactly
/// [`KEYPOINT_COUNT`] entries in each; anything else is still ingested as far as the arrays
/// agree, but is not rendered as a wireframe.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HandPoseSnapshot {
    /// Is the hand currently tracked?
    pub valid: bool,
    /// World position of each keypoint
    pub positions: Vec<Vec3>,
    /// World orientation of each keypoint
    pub rotations: Vec<Quat>,
    /// Radius of each keypoint
    pub radii: Vec<f32>,
}

impl HandPoseSnapshot {
    /// A snapshot for a hand that isn't being tracked.
    pub fn untracked() -> Self {
        Self::default()
    }

    /// A valid snapshot with every keypoint at the origin, facing forward.
    pub fn at_rest() -> Self {
        Self {
            valid: true,
            positions: vec![Vec3::ZERO; KEYPOINT_COUNT],
            rotations: vec![Quat::IDENTITY; KEYPOINT_COUNT],
            radii: vec![0.; KEYPOINT_COUNT],
        }
    }

    /// Do all arrays hold exactly one entry per keypoint?
    pub fn is_well_formed(&self) -> bool {
        self.positions.len() == KEYPOINT_COUNT
            && self.rotations.len() == KEYPOINT_COUNT
            && self.radii.len() == KEYPOINT_COUNT
    }

    /// Number of keypoints that have a position, rotation and radius.
    pub fn keypoint_count(&self) -> usize {
        self.positions
            .len()
            .min(self.rotations.len())
            .min(self.radii.len())
            .min(KEYPOINT_COUNT)
    }

    /// Position of `keypoint`, if present.
    pub fn position(&self, keypoint: Keypoint) -> Option<Vec3> {
        self.positions.get(keypoint.index()).copied()
    }

    /// Rotation of `keypoint`, if present.
    pub fn rotation(&self, keypoint: Keypoint) -> Option<Quat> {
        self.rotations.get(keypoint.index()).copied()
    }

    /// Radius of `keypoint`, if present.
    pub fn radius(&self, keypoint: Keypoint) -> Option<f32> {
        self.radii.get(keypoint.index()).copied()
    }

    /// Builder style helper to move a single keypoint. Grows the arrays if needed.
    pub fn with_keypoint(mut self, keypoint: Keypoint, position: Vec3, rotation: Quat) -> Self {
        self.set_keypoint(keypoint, position, rotation);
        self
    }

    /// Move a single keypoint. Grows the arrays if needed.
    pub fn set_keypoint(&mut self, keypoint: Keypoint, position: Vec3, rotation: Quat) {
        let index = keypoint.index();
        if self.positions.len() <= index {
            self.positions.resize(index + 1, Vec3::ZERO);
        }
        if self.rotations.len() <= index {
            self.rotations.resize(index + 1, Quat::IDENTITY);
        }
        if self.radii.len() <= index {
            self.radii.resize(index + 1, 0.);
        }
        self.positions[index] = position;
        self.rotations[index] = rotation;
    }
}
