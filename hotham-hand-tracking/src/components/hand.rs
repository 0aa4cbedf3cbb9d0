use serde::{Deserialize, Serialize};

/// A component that represents the "side" or "handedness" that an entity is on
/// Used by components such as `TrackedHand` to identify which hand the pose source should report
#[derive(
    Debug, Default, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub enum Handedness {
    /// Left hand side
    Left,
    /// Right hand side
    #[default]
    Right,
}
