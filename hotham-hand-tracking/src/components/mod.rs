/// Which side a hand is on
pub mod hand;
/// The pointer ray that follows the palm
pub mod pointer_ray;
/// A hand driven by hand tracking
pub mod tracked_hand;
/// World space transforms
pub mod transform;

pub use hand::Handedness;
pub use pointer_ray::{PointerNode, PointerRay, SceneNode, SharedPointerNode};
pub use tracked_hand::{TrackedHand, TrackingChanged};
pub use transform::Transform;
