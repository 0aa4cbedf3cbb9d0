use serde::{Deserialize, Serialize};

/// An opaque handle to an input action owned by the host's input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct InputActionHandle(pub u32);

/// The host's input system, able to simulate an action being activated.
pub trait InputInjector {
    /// Simulate `action` with the given analog `value`.
    fn inject_action(&mut self, action: InputActionHandle, value: f32);
}

/// Wrapper around simulated input. Values requested this frame are applied by the host, which
/// then resets the context.
#[derive(Clone, Debug, Default)]
pub struct InputInjectionContext {
    /// Actions that should be injected this frame, in request order
    pub injections_this_frame: Vec<(InputActionHandle, f32)>,
}

impl InputInjectionContext {
    /// The most recent value requested for `action` this frame, if any.
    pub fn value(&self, action: InputActionHandle) -> Option<f32> {
        self.injections_this_frame
            .iter()
            .rev()
            .find(|(a, _)| *a == action)
            .map(|(_, v)| *v)
    }

    /// Hand every requested injection to `injector` and reset the context.
    pub fn apply(&mut self, injector: &mut dyn InputInjector) {
        for (action, value) in self.injections_this_frame.drain(..) {
            injector.inject_action(action, value);
        }
    }
}

impl InputInjector for InputInjectionContext {
    fn inject_action(&mut self, action: InputActionHandle, value: f32) {
        self.injections_this_frame.push((action, value));
    }
}
