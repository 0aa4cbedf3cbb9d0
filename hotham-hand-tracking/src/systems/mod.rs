/// Drives every tracked hand in a world
pub mod tracked_hands;

pub use tracked_hands::tracked_hands_system;
