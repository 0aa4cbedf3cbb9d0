/// Hand poses from an OpenXR runtime
pub mod openxr_source;
/// Hand poses played back from a recording
pub mod recorded;

pub use openxr_source::OpenXrPoseSource;
pub use recorded::{HandRecording, RecordedPoseSource};

use crate::{components::Handedness, pose::HandPoseSnapshot, HandTrackingResult};

/// Anything that can report the pose of a hand each frame, usually an XR runtime.
///
/// Implementations own all runtime specific details such as joint naming, so hands never need
/// to know which runtime they are talking to.
pub trait PoseSource {
    /// The latest pose of the hand on `handedness` side.
    fn hand_pose(&mut self, handedness: Handedness) -> HandTrackingResult<HandPoseSnapshot>;
}
