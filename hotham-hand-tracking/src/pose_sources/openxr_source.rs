use glam::{Quat, Vec3};
use openxr::{self as xr, HandJointLocation, HandTracker, Space, SpaceLocationFlags};

use crate::{
    components::Handedness, keypoint::Keypoint, pose::HandPoseSnapshot, HandTrackingError,
    HandTrackingResult,
};

use super::PoseSource;

/// Reads hand poses from an OpenXR runtime through `XR_EXT_hand_tracking`.
///
/// OpenXR joints are reported in the same order as [`Keypoint`], so joints map across one to
/// one.
pub struct OpenXrPoseSource {
    left_hand_tracker: HandTracker,
    right_hand_tracker: HandTracker,
    reference_space: Space,
    predicted_display_time: xr::Time,
}

impl OpenXrPoseSource {
    /// Create a tracker for each hand. Joints are located relative to `reference_space`,
    /// typically the stage.
    pub fn new<G: xr::Graphics>(
        session: &xr::Session<G>,
        reference_space: Space,
    ) -> HandTrackingResult<Self> {
        if session.instance().exts().ext_hand_tracking.is_none() {
            return Err(HandTrackingError::UnsupportedExtensionError);
        }

        Ok(Self {
            left_hand_tracker: session.create_hand_tracker(xr::Hand::LEFT)?,
            right_hand_tracker: session.create_hand_tracker(xr::Hand::RIGHT)?,
            reference_space,
            predicted_display_time: xr::Time::from_nanos(0),
        })
    }

    /// Locate joints at this time from now on. Call once per frame with the frame state's
    /// predicted display time.
    pub fn set_predicted_display_time(&mut self, time: xr::Time) {
        self.predicted_display_time = time;
    }
}

impl PoseSource for OpenXrPoseSource {
    fn hand_pose(&mut self, handedness: Handedness) -> HandTrackingResult<HandPoseSnapshot> {
        let tracker = match handedness {
            Handedness::Left => &self.left_hand_tracker,
            Handedness::Right => &self.right_hand_tracker,
        };
        let joints = self
            .reference_space
            .locate_hand_joints(tracker, self.predicted_display_time)?;
        Ok(snapshot_from_joints(joints.as_ref().map(|j| &j[..])))
    }
}

/// Convert located joints into a snapshot. A hand is tracked if the runtime located it and
/// its palm pose is valid.
pub fn snapshot_from_joints(joints: Option<&[HandJointLocation]>) -> HandPoseSnapshot {
    let Some(joints) = joints else {
        return HandPoseSnapshot::untracked();
    };

    let palm_valid = joints.get(Keypoint::Palm.index()).map_or(false, |palm| {
        palm.location_flags.contains(
            SpaceLocationFlags::POSITION_VALID | SpaceLocationFlags::ORIENTATION_VALID,
        )
    });

    HandPoseSnapshot {
        valid: palm_valid,
        positions: joints
            .iter()
            .map(|j| mint::Vector3::from(j.pose.position).into())
            .collect::<Vec<Vec3>>(),
        rotations: joints
            .iter()
            .map(|j| mint::Quaternion::from(j.pose.orientation).into())
            .collect::<Vec<Quat>>(),
        radii: joints.iter().map(|j| j.radius).collect(),
    }
}
