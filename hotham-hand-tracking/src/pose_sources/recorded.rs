use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    components::Handedness, pose::HandPoseSnapshot, HandTrackingError, HandTrackingResult,
};

use super::PoseSource;

/// A captured hand-tracking session: one snapshot per frame for each hand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandRecording {
    /// Frames of the left hand
    pub left: Vec<HandPoseSnapshot>,
    /// Frames of the right hand
    pub right: Vec<HandPoseSnapshot>,
}

impl HandRecording {
    /// Frames recorded for `handedness`.
    pub fn frames(&self, handedness: Handedness) -> &[HandPoseSnapshot] {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
        }
    }
}

/// Plays a [`HandRecording`] back, one frame per call for each hand.
///
/// Useful for tests and for running without a headset. Once a hand runs out of frames it
/// either loops or reports itself as untracked.
#[derive(Debug, Clone)]
pub struct RecordedPoseSource {
    recording: HandRecording,
    looping: bool,
    left_frame: usize,
    right_frame: usize,
}

impl RecordedPoseSource {
    /// Play `recording` back. Fails if it has no frames at all.
    pub fn new(recording: HandRecording, looping: bool) -> HandTrackingResult<Self> {
        if recording.left.is_empty() && recording.right.is_empty() {
            return Err(HandTrackingError::EmptyRecording);
        }

        Ok(Self {
            recording,
            looping,
            left_frame: 0,
            right_frame: 0,
        })
    }

    /// Parse a recording from JSON.
    pub fn from_json(json: &str, looping: bool) -> HandTrackingResult<Self> {
        Self::new(serde_json::from_str(json)?, looping)
    }

    /// Read and parse a JSON recording file.
    pub fn load(path: impl AsRef<Path>, looping: bool) -> HandTrackingResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, looping)
    }

    /// Start playback from the first frame again.
    pub fn rewind(&mut self) {
        self.left_frame = 0;
        self.right_frame = 0;
    }

    /// Length of the longer of the two hands' recordings.
    pub fn frame_count(&self) -> usize {
        self.recording.left.len().max(self.recording.right.len())
    }

    /// Has every frame of both hands been played? Never true while looping.
    pub fn is_finished(&self) -> bool {
        !self.looping
            && self.left_frame >= self.recording.left.len()
            && self.right_frame >= self.recording.right.len()
    }
}

impl PoseSource for RecordedPoseSource {
    fn hand_pose(&mut self, handedness: Handedness) -> HandTrackingResult<HandPoseSnapshot> {
        let frames = self.recording.frames(handedness);
        let cursor = match handedness {
            Handedness::Left => &mut self.left_frame,
            Handedness::Right => &mut self.right_frame,
        };

        if frames.is_empty() {
            return Ok(HandPoseSnapshot::untracked());
        }
        if *cursor >= frames.len() {
            if !self.looping {
                return Ok(HandPoseSnapshot::untracked());
            }
            *cursor = 0;
        }

        let snapshot = frames[*cursor].clone();
        *cursor += 1;
        Ok(snapshot)
    }
}
