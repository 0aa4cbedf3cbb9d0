use hecs::World;
use log::warn;

use crate::{
    components::TrackedHand,
    contexts::{BoneInstances, DebugDraw, HandOutputs, InputInjector},
    pose::HandPoseSnapshot,
    pose_sources::PoseSource,
};

/// Tracked hands system
/// Reads the pose of every `TrackedHand` from `pose_source` and updates it for this frame.
///
/// Each hand entity needs a `BoneInstances` component alongside its `TrackedHand` to collect
/// its bone proxies. Wireframes and pinches from every hand go to the shared `debug_draw` and
/// `input` contexts.
///
/// Basic usage:
/// ```ignore
/// fn tick(...) {
///    tracked_hands_system(world, pose_source, debug_draw_context, input_context, delta_time)
/// }
/// ```
pub fn tracked_hands_system(
    world: &mut World,
    pose_source: &mut dyn PoseSource,
    debug_draw: &mut dyn DebugDraw,
    input: &mut dyn InputInjector,
    delta_time: f32,
) {
    for (_, (hand, instances)) in world.query_mut::<(&mut TrackedHand, &mut BoneInstances)>() {
        let snapshot = match pose_source.hand_pose(hand.handedness()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "[HAND_TRACKING] Unable to get the {:?} hand pose, treating it as untracked: {:?}",
                    hand.handedness(),
                    e
                );
                HandPoseSnapshot::untracked()
            }
        };

        let mut outputs = HandOutputs::new(instances, &mut *debug_draw, &mut *input);
        hand.update_hand(&snapshot, delta_time, &mut outputs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        components::Handedness,
        config::HandConfig,
        contexts::{DebugDrawContext, InputActionHandle, InputInjectionContext},
        keypoint::{Keypoint, PinchFinger, KEYPOINT_COUNT},
        pose_sources::{HandRecording, RecordedPoseSource},
        HandTrackingError, HandTrackingResult,
    };
    use glam::{vec3, Quat};

    struct BrokenPoseSource;

    impl PoseSource for BrokenPoseSource {
        fn hand_pose(&mut self, _: Handedness) -> HandTrackingResult<HandPoseSnapshot> {
            Err(HandTrackingError::EmptyRecording)
        }
    }

    #[test]
    pub fn test_tracked_hands_system() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut world = World::default();
        let mut debug_draw = DebugDrawContext::default();
        let mut input = InputInjectionContext::default();

        let mut left = TrackedHand::left();
        left.register_input_action(PinchFinger::Index, Some(InputActionHandle(0)));
        let left = world.spawn((left, BoneInstances::default()));
        let right = world.spawn((TrackedHand::right(), BoneInstances::default()));

        let pinching = HandPoseSnapshot::at_rest()
            .with_keypoint(Keypoint::IndexTip, vec3(0.5, 0., 0.), Quat::IDENTITY)
            .with_keypoint(Keypoint::MiddleTip, vec3(9., 0., 0.), Quat::IDENTITY);
        let recording = HandRecording {
            left: vec![pinching],
            right: vec![],
        };
        let mut pose_source = RecordedPoseSource::new(recording, false).unwrap();

        tracked_hands_system(&mut world, &mut pose_source, &mut debug_draw, &mut input, 0.01);

        {
            let hand = world.get::<&TrackedHand>(left).unwrap();
            assert!(hand.is_hand_tracked());
            assert!(hand.is_pinching(PinchFinger::Index));
            assert!(!hand.is_pinching(PinchFinger::Middle));
            assert_eq!(world.get::<&BoneInstances>(left).unwrap().len(), KEYPOINT_COUNT);

            assert!(!world.get::<&TrackedHand>(right).unwrap().is_hand_tracked());
            assert!(world.get::<&BoneInstances>(right).unwrap().is_empty());
        }
        assert_eq!(input.value(InputActionHandle(0)), Some(1.0));

        // The recording has run out, so both hands are lost.
        tracked_hands_system(&mut world, &mut pose_source, &mut debug_draw, &mut input, 0.01);
        assert!(!world.get::<&TrackedHand>(left).unwrap().is_hand_tracked());
        assert!(world.get::<&BoneInstances>(left).unwrap().is_empty());
    }

    #[test]
    pub fn test_pose_source_errors_untrack_the_hand() {
        let mut world = World::default();
        let mut debug_draw = DebugDrawContext::default();
        let mut input = InputInjectionContext::default();
        let hand = world.spawn((
            TrackedHand::new(HandConfig::left()),
            BoneInstances::default(),
        ));

        tracked_hands_system(&mut world, &mut BrokenPoseSource, &mut debug_draw, &mut input, 0.01);
        assert!(!world.get::<&TrackedHand>(hand).unwrap().is_hand_tracked());
        assert!(input.injections_this_frame.is_empty());
    }
}
