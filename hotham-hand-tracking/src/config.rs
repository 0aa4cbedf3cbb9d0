use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    components::{Handedness, Transform},
    contexts::Color,
    HandTrackingResult,
};

/// How a tracked hand should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum HandRendering {
    /// One proxy per bone
    #[default]
    InstancedMesh,
    /// Debug lines and spheres along each finger
    Wireframe,
    /// Both of the above
    Both,
}

impl HandRendering {
    /// Should bone proxies be requested?
    pub fn instanced(self) -> bool {
        matches!(self, HandRendering::InstancedMesh | HandRendering::Both)
    }

    /// Should the wireframe be drawn?
    pub fn wireframe(self) -> bool {
        matches!(self, HandRendering::Wireframe | HandRendering::Both)
    }
}

/// Appearance of the debug wireframe.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WireframeConfig {
    /// Colour of every line and sphere
    pub color: Color,
    /// Line thickness
    pub thickness: f32,
    /// Depth priority handed to the debug draw surface
    pub depth_priority: u8,
    /// Draw the palm to metacarpal connectives?
    pub render_palm: bool,
    /// Draw a sphere on every joint?
    pub render_bones: bool,
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            thickness: 0.05,
            depth_priority: 0,
            render_palm: true,
            render_bones: true,
        }
    }
}

/// Behaviour of the pointer ray that follows the palm.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PointerRayConfig {
    /// Move the pointer at all?
    pub enabled: bool,
    /// Move the pointer at the end of every tracked `update_hand`. When unset, the host calls
    /// `update_pointer_ray` itself.
    pub update_with_hand: bool,
    /// Pitch added to the palm orientation, in degrees
    pub angle_from_palm: f32,
    /// Fraction of the remaining distance covered per second
    pub location_speed: f32,
    /// Fraction of the remaining rotation covered per second
    pub rotation_speed: f32,
    /// Hide the pointer while the hand isn't tracked?
    pub hide_when_untracked: bool,
}

impl Default for PointerRayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            update_with_hand: true,
            angle_from_palm: 45.,
            location_speed: 8.,
            rotation_speed: 4.,
            hide_when_untracked: false,
        }
    }
}

/// Settings for a single [`crate::components::TrackedHand`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandConfig {
    /// Which hand this is
    pub handedness: Handedness,
    /// Multiplier applied to every keypoint radius to size its proxy
    pub bone_scale: f32,
    /// Maximum thumb to fingertip distance that still counts as a pinch
    pub pinch_threshold: f32,
    /// Proxies, wireframe or both
    pub rendering: HandRendering,
    /// Draw nothing at all
    pub hide_hand: bool,
    /// Only request proxies for the five fingertips
    pub only_display_tips: bool,
    /// Wireframe appearance
    pub wireframe: WireframeConfig,
    /// Pointer ray behaviour
    pub pointer: PointerRayConfig,
    /// Reported as the hand transform while the hand isn't tracked
    pub fallback_transform: Transform,
    /// Derive parent-relative rotations every tracked frame
    pub compute_relative_rotations: bool,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            handedness: Handedness::Right,
            bone_scale: 0.01,
            pinch_threshold: 1.5,
            rendering: HandRendering::InstancedMesh,
            hide_hand: false,
            only_display_tips: false,
            wireframe: Default::default(),
            pointer: Default::default(),
            fallback_transform: Default::default(),
            compute_relative_rotations: false,
        }
    }
}

impl HandConfig {
    /// Shortcut helper to create a config for the left hand
    pub fn left() -> Self {
        Self {
            handedness: Handedness::Left,
            ..Default::default()
        }
    }

    /// Shortcut helper to create a config for the right hand
    pub fn right() -> Self {
        Self {
            handedness: Handedness::Right,
            ..Default::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> HandTrackingResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> HandTrackingResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
