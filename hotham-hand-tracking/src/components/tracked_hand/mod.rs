#[cfg(test)]
mod tests;

use std::fmt;

use glam::{Affine3A, Quat, Vec3};
use log::{debug, trace, warn};

use crate::{
    config::HandConfig,
    contexts::{DebugDraw, HandOutputs, InputActionHandle, InputInjector},
    keypoint::{Finger, Keypoint, PinchFinger, KEYPOINT_COUNT},
    pose::HandPoseSnapshot,
    rotator::Rotator,
};

use super::{
    pointer_ray::{PointerRay, SharedPointerNode},
    Handedness, Transform,
};

/// Sent to observers whenever a hand starts or stops being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingChanged {
    /// Which hand changed
    pub handedness: Handedness,
    /// Is the hand tracked now?
    pub tracked: bool,
}

type TrackingObserver = Box<dyn FnMut(TrackingChanged) + Send + Sync>;

/// A component that's added to an entity to represent a hand driven by hand tracking.
///
/// Each frame the hand ingests a [`HandPoseSnapshot`], keeps the last tracked pose of every
/// keypoint, requests one proxy per bone from the renderer, sends pinch gestures to the input
/// system and steers an optional pointer ray towards the palm.
///
/// Requires `tracked_hands_system`, or call [`TrackedHand::update_hand`] yourself.
pub struct TrackedHand {
    /// Settings for this hand. Can be changed between frames.
    pub config: HandConfig,
    tracked: bool,
    tracked_last_frame: bool,
    bone_locations: [Vec3; KEYPOINT_COUNT],
    bone_rotations: [Quat; KEYPOINT_COUNT],
    bone_relative_rotations: [Quat; KEYPOINT_COUNT],
    palm_transform: Transform,
    input_actions: [Option<InputActionHandle>; PinchFinger::COUNT],
    pointer: PointerRay,
    observers: Vec<TrackingObserver>,
}

impl TrackedHand {
    /// Create a hand that has never been tracked.
    pub fn new(config: HandConfig) -> Self {
        Self {
            palm_transform: config.fallback_transform,
            config,
            tracked: false,
            tracked_last_frame: false,
            bone_locations: [Vec3::ZERO; KEYPOINT_COUNT],
            bone_rotations: [Quat::IDENTITY; KEYPOINT_COUNT],
            bone_relative_rotations: [Quat::IDENTITY; KEYPOINT_COUNT],
            input_actions: [None; PinchFinger::COUNT],
            pointer: Default::default(),
            observers: Vec::new(),
        }
    }

    /// Shortcut helper to create a left hand with the default settings
    pub fn left() -> Self {
        Self::new(HandConfig::left())
    }

    /// Shortcut helper to create a right hand with the default settings
    pub fn right() -> Self {
        Self::new(HandConfig::right())
    }

    /// Which side is this hand on?
    pub fn handedness(&self) -> Handedness {
        self.config.handedness
    }

    /// Ingest one frame of tracking data. Returns whether the hand was tracked this frame.
    ///
    /// When the snapshot isn't valid nothing but the tracked flag changes: every bone keeps its
    /// last tracked pose and no gestures or pointer updates are produced.
    pub fn update_hand(
        &mut self,
        snapshot: &HandPoseSnapshot,
        delta_time: f32,
        outputs: &mut HandOutputs<'_>,
    ) -> bool {
        outputs.renderer.clear_instances();

        self.set_tracked(snapshot.valid);
        if !self.tracked {
            return false;
        }

        if !snapshot.is_well_formed() {
            warn!(
                "[HAND_TRACKING] {:?} snapshot has {} positions, {} rotations and {} radii",
                self.handedness(),
                snapshot.positions.len(),
                snapshot.rotations.len(),
                snapshot.radii.len()
            );
        }

        // A hidden hand draws no wireframe either.
        if !self.config.hide_hand && self.config.rendering.wireframe() {
            for finger in Finger::ALL {
                self.render_finger(
                    snapshot,
                    finger.metacarpal().index(),
                    finger.tip().index(),
                    &mut *outputs.debug_draw,
                );
            }
        }

        let render_instances = !self.config.hide_hand && self.config.rendering.instanced();
        for i in 0..snapshot.keypoint_count() {
            let position = snapshot.positions[i];
            let rotation = snapshot.rotations[i];
            self.bone_locations[i] = position;
            self.bone_rotations[i] = rotation;

            if i == Keypoint::Palm.index() {
                self.palm_transform = Transform::from_rotation_translation(rotation, position);
            }

            if !render_instances || (self.config.only_display_tips && !is_tip_index(i)) {
                continue;
            }

            let bone_scale = snapshot.radii[i] * self.config.bone_scale;
            let transform =
                Affine3A::from_scale_rotation_translation(Vec3::splat(bone_scale), rotation, position);
            outputs.renderer.add_instance(transform, true);
        }

        if self.config.compute_relative_rotations {
            self.bone_relative_rotations = relative_rotations(&self.bone_rotations);
        }

        self.broadcast_pinches(&mut *outputs.input);

        if self.config.pointer.update_with_hand {
            self.update_pointer_ray(delta_time);
        }

        true
    }

    /// Was the hand tracked in the most recent update?
    pub fn is_hand_tracked(&self) -> bool {
        self.tracked
    }

    /// Distance between the thumb tip and the tip of `finger`.
    pub fn pinch_distance(&self, finger: PinchFinger) -> f32 {
        let thumb = self.bone_locations[Keypoint::ThumbTip.index()];
        let other = self.bone_locations[finger.tip().index()];
        thumb.distance(other)
    }

    /// Is the thumb close enough to `finger` to count as a pinch? The threshold is inclusive.
    pub fn is_pinching(&self, finger: PinchFinger) -> bool {
        self.pinch_distance(finger) <= self.config.pinch_threshold
    }

    /// Last tracked world position of `keypoint`.
    pub fn bone_location(&self, keypoint: Keypoint) -> Vec3 {
        self.bone_locations[keypoint.index()]
    }

    /// Last tracked world orientation of `keypoint`.
    pub fn bone_rotation(&self, keypoint: Keypoint) -> Quat {
        self.bone_rotations[keypoint.index()]
    }

    /// Last tracked world orientation of `keypoint`, as Euler angles.
    pub fn bone_rotator(&self, keypoint: Keypoint) -> Rotator {
        Rotator::from_quat(self.bone_rotation(keypoint))
    }

    /// Orientation of `keypoint` in its parent's frame. The wrist has no parent, so its world
    /// orientation is returned instead.
    ///
    /// Only updated while `compute_relative_rotations` is set.
    pub fn bone_relative_rotation(&self, keypoint: Keypoint) -> Quat {
        self.bone_relative_rotations[keypoint.index()]
    }

    /// Transform of the palm, or the configured fallback while the hand isn't tracked.
    pub fn hand_transform(&self) -> Transform {
        if self.tracked {
            self.palm_transform
        } else {
            self.config.fallback_transform
        }
    }

    /// Send pinches of `finger` to `action`, or stop sending them with `None`.
    pub fn register_input_action(&mut self, finger: PinchFinger, action: Option<InputActionHandle>) {
        debug!(
            "[HAND_TRACKING] {:?} {:?} pinch now drives {:?}",
            self.handedness(),
            finger,
            action
        );
        self.input_actions[finger.index()] = action;
    }

    /// Attach the pointer ray to `node`. Registering a node enables the pointer, `None`
    /// disables it. With `hide_when_untracked` set, the node starts out hidden unless the hand
    /// is tracked.
    pub fn register_hand_ray(&mut self, node: Option<&SharedPointerNode>) {
        debug!(
            "[HAND_TRACKING] {:?} pointer ray {}",
            self.handedness(),
            if node.is_some() { "registered" } else { "cleared" }
        );
        self.pointer.register(node);
        self.config.pointer.enabled = node.is_some();
        if self.config.pointer.hide_when_untracked {
            self.pointer.set_visible(self.tracked);
        }
    }

    /// Move the pointer ray one step towards the palm. Does nothing when the pointer is
    /// disabled or its node is gone.
    pub fn update_pointer_ray(&self, delta_time: f32) -> bool {
        self.pointer
            .update(&self.config.pointer, &self.palm_transform, delta_time)
    }

    /// Call `observer` every time this hand starts or stops being tracked.
    pub fn on_tracking_changed(
        &mut self,
        observer: impl FnMut(TrackingChanged) + Send + Sync + 'static,
    ) {
        self.observers.push(Box::new(observer));
    }

    fn set_tracked(&mut self, tracked: bool) {
        self.tracked = tracked;
        if self.tracked == self.tracked_last_frame {
            return;
        }
        self.tracked_last_frame = tracked;

        debug!(
            "[HAND_TRACKING] {:?} hand is {}",
            self.handedness(),
            if tracked { "tracked" } else { "no longer tracked" }
        );

        if self.config.pointer.hide_when_untracked {
            self.pointer.set_visible(tracked);
        }

        let event = TrackingChanged {
            handedness: self.handedness(),
            tracked,
        };
        for observer in &mut self.observers {
            observer(event);
        }
    }

    fn broadcast_pinches(&self, input: &mut dyn InputInjector) {
        for finger in PinchFinger::ALL {
            let Some(action) = self.input_actions[finger.index()] else {
                continue;
            };
            let pinching = self.is_pinching(finger);
            trace!(
                "[HAND_TRACKING] {:?} {:?} pinching: {}",
                self.handedness(),
                finger,
                pinching
            );
            input.inject_action(action, if pinching { 1.0 } else { 0.0 });
        }
    }

    fn render_finger(
        &self,
        snapshot: &HandPoseSnapshot,
        start: usize,
        end: usize,
        debug_draw: &mut dyn DebugDraw,
    ) {
        let valid_index = |i: usize| i > 0 && i < KEYPOINT_COUNT;
        let valid = valid_index(start)
            && valid_index(end)
            && snapshot.positions.len() == KEYPOINT_COUNT
            && snapshot.radii.len() == KEYPOINT_COUNT;
        if !valid {
            return;
        }

        let wireframe = &self.config.wireframe;
        let positions = &snapshot.positions;

        if wireframe.render_palm {
            let palm = positions[Keypoint::Palm.index()];
            let wrist = positions[Keypoint::Wrist.index()];
            self.draw_segment(debug_draw, palm, wrist);
            self.draw_segment(debug_draw, wrist, positions[start]);
        }

        for joint in start..end {
            self.draw_segment(debug_draw, positions[joint], positions[joint + 1]);

            if wireframe.render_bones {
                debug_draw.draw_sphere(
                    positions[joint + 1],
                    snapshot.radii[joint + 1],
                    wireframe.color,
                    wireframe.thickness,
                    wireframe.depth_priority,
                );
            }
        }
    }

    fn draw_segment(&self, debug_draw: &mut dyn DebugDraw, from: Vec3, to: Vec3) {
        let wireframe = &self.config.wireframe;
        debug_draw.draw_line(
            from,
            to,
            wireframe.color,
            wireframe.thickness,
            wireframe.depth_priority,
        );
    }
}

impl fmt::Debug for TrackedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedHand")
            .field("handedness", &self.handedness())
            .field("tracked", &self.tracked)
            .field("palm_transform", &self.palm_transform)
            .field("input_actions", &self.input_actions)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn is_tip_index(index: usize) -> bool {
    Keypoint::from_index(index).map_or(false, Keypoint::is_tip)
}

/// Express every rotation in its parent's frame. The wrist, having no parent, keeps its world
/// rotation.
pub fn relative_rotations(rotations: &[Quat; KEYPOINT_COUNT]) -> [Quat; KEYPOINT_COUNT] {
    let mut relative = [Quat::IDENTITY; KEYPOINT_COUNT];
    for keypoint in Keypoint::ALL {
        let rotation = rotations[keypoint.index()];
        relative[keypoint.index()] = match keypoint.parent() {
            Some(parent) => rotations[parent.index()].inverse() * rotation,
            None => rotation,
        };
    }
    relative
}
