/// Bone proxies for the renderer
pub mod bone_instances;
/// Debug lines and spheres
pub mod debug_draw;
/// Simulated input actions
pub mod input_injection;

pub use bone_instances::{BoneInstance, BoneInstances, BoneRenderer};
pub use debug_draw::{Color, DebugDraw, DebugDrawContext, DebugLine, DebugSphere};
pub use input_injection::{InputActionHandle, InputInjectionContext, InputInjector};

/// Everything a hand writes to during a frame.
pub struct HandOutputs<'a> {
    /// Receives one proxy per bone
    pub renderer: &'a mut dyn BoneRenderer,
    /// Receives the wireframe
    pub debug_draw: &'a mut dyn DebugDraw,
    /// Receives pinch values
    pub input: &'a mut dyn InputInjector,
}

impl<'a> HandOutputs<'a> {
    /// Bundle the three outputs of a hand.
    pub fn new(
        renderer: &'a mut dyn BoneRenderer,
        debug_draw: &'a mut dyn DebugDraw,
        input: &'a mut dyn InputInjector,
    ) -> Self {
        Self {
            renderer,
            debug_draw,
            input,
        }
    }
}
