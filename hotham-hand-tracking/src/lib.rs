#![deny(missing_docs)]

//! Hand tracking for Hotham 🖐️
//!
//! Turns the skeletal hand poses reported by an XR runtime into something a game can use:
//! the last tracked pose of every keypoint, one proxy per bone for the renderer, pinch
//! gestures sent to the input system, and a pointer ray that smoothly follows the palm.
//!
//! # Getting started
//! Spawn an entity with a [`components::TrackedHand`] and a [`contexts::BoneInstances`], then
//! call [`systems::tracked_hands_system`] once per frame with a [`pose_sources::PoseSource`]:
//! [`pose_sources::OpenXrPoseSource`] on a headset, or [`pose_sources::RecordedPoseSource`] to
//! replay a captured session.
//!
//! Nothing here touches the renderer or the XR runtime directly. Bone proxies, wireframes and
//! injected input are collected into contexts that the host drains each frame.

pub use glam;
pub use hecs;

pub use components::{Handedness, TrackedHand, TrackingChanged, Transform};
pub use config::HandConfig;
pub use hand_tracking_error::HandTrackingError;
pub use keypoint::{Finger, Keypoint, PinchFinger, KEYPOINT_COUNT};
pub use pose::HandPoseSnapshot;
pub use rotator::Rotator;

/// Components are data that are used to update the simulation and interact with the external world
pub mod components;
/// Settings for tracked hands
pub mod config;
/// Contexts collect what hands produce each frame, for the host to draw or apply
pub mod contexts;
mod hand_tracking_error;
/// Names and hierarchy of the keypoints of a hand
pub mod keypoint;
/// A single frame of hand-tracking data
pub mod pose;
/// Where hand poses come from
pub mod pose_sources;
/// Euler angle orientations
pub mod rotator;
/// Systems are functions called each frame to update either the external state or the current simulation
pub mod systems;

/// Hand tracking result type
pub type HandTrackingResult<T> = std::result::Result<T, HandTrackingError>;
