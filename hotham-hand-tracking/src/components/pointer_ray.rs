use std::sync::{Arc, Mutex, Weak};

use glam::Vec3;
use log::warn;

use crate::{config::PointerRayConfig, rotator::Rotator};

use super::Transform;

/// A node in the host's scene graph that the pointer ray is attached to.
pub trait PointerNode: Send {
    /// Current position of the node
    fn position(&self) -> Vec3;
    /// Current orientation of the node
    fn rotation(&self) -> Rotator;
    /// Move and rotate the node in one step
    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Rotator);
    /// Show or hide the node
    fn set_visible(&mut self, visible: bool);
}

/// A pointer node shared between the host and a hand.
pub type SharedPointerNode = Arc<Mutex<dyn PointerNode>>;

/// A plain scene node, for hosts that just want to read the pointer transform back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    /// Position of the node
    pub position: Vec3,
    /// Orientation of the node
    pub rotation: Rotator,
    /// Is the node shown?
    pub visible: bool,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Rotator::ZERO,
            visible: true,
        }
    }
}

impl SceneNode {
    /// Wrap the node up so it can be registered with a hand.
    pub fn shared(self) -> Arc<Mutex<SceneNode>> {
        Arc::new(Mutex::new(self))
    }
}

impl PointerNode for SceneNode {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Rotator {
        self.rotation
    }

    fn set_position_and_rotation(&mut self, position: Vec3, rotation: Rotator) {
        self.position = position;
        self.rotation = rotation;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A ray that smoothly follows the palm, used to point at things out of reach.
///
/// The hand only holds a weak reference to the node: once the host drops it, every pointer
/// operation quietly does nothing.
#[derive(Default)]
pub struct PointerRay {
    node: Option<Weak<Mutex<dyn PointerNode>>>,
}

impl PointerRay {
    /// Attach the ray to `node`, or detach it with `None`.
    pub fn register(&mut self, node: Option<&SharedPointerNode>) {
        self.node = node.map(Arc::downgrade);
    }

    /// The node the ray is attached to, if it is still alive.
    pub fn node(&self) -> Option<SharedPointerNode> {
        self.node.as_ref().and_then(Weak::upgrade)
    }

    /// Show or hide the node.
    pub fn set_visible(&self, visible: bool) {
        self.with_node(|node| node.set_visible(visible));
    }

    /// Move the node one step closer to the palm. Returns false if nothing was moved.
    pub fn update(&self, config: &PointerRayConfig, palm: &Transform, delta_time: f32) -> bool {
        if !config.enabled {
            return false;
        }

        self.with_node(|node| {
            let (position, rotation) = follow_palm(
                node.position(),
                node.rotation(),
                palm,
                config,
                delta_time,
            );
            node.set_position_and_rotation(position, rotation);
        })
    }

    fn with_node(&self, f: impl FnOnce(&mut dyn PointerNode)) -> bool {
        let Some(node) = self.node() else {
            return false;
        };

        let mut node = match node.lock() {
            Ok(node) => node,
            Err(_) => {
                warn!("[HAND_POINTER] Pointer node lock is poisoned, skipping");
                return false;
            }
        };

        f(&mut *node);
        true
    }
}

/// The pitch-offset palm orientation the ray aims along.
pub fn pointer_target(palm: &Transform, angle_from_palm: f32) -> (Vec3, Rotator) {
    let mut rotation = Rotator::from_quat(palm.rotation);
    rotation.pitch += angle_from_palm;
    (palm.translation, rotation)
}

/// One step of the exponential follower. There is no velocity: the state lives entirely in
/// the node's current transform.
pub fn follow_palm(
    position: Vec3,
    rotation: Rotator,
    palm: &Transform,
    config: &PointerRayConfig,
    delta_time: f32,
) -> (Vec3, Rotator) {
    let (target_position, target_rotation) = pointer_target(palm, config.angle_from_palm);

    let location_alpha = (delta_time * config.location_speed).clamp(0., 1.);
    let rotation_alpha = delta_time * config.rotation_speed;

    (
        position.lerp(target_position, location_alpha),
        rotation.lerp(target_rotation, rotation_alpha),
    )
}
