use std::sync::{Arc, Mutex};

use anyhow::Result;
use glam::{vec3, Quat};
use hecs::World;
use hotham_hand_tracking::{
    components::{SceneNode, SharedPointerNode},
    contexts::{
        BoneInstances, DebugDrawContext, InputActionHandle, InputInjectionContext, InputInjector,
    },
    pose_sources::{HandRecording, RecordedPoseSource},
    systems::tracked_hands_system,
    HandConfig, HandPoseSnapshot, Keypoint, PinchFinger, TrackedHand,
};
use log::{debug, info};

const FRAME_RATE: f32 = 72.;
const SYNTHETIC_FRAMES: usize = 90;
const LOST_FRAMES: usize = 10;

/// Stands in for the engine's input system.
struct LoggingInput;

impl InputInjector for LoggingInput {
    fn inject_action(&mut self, action: InputActionHandle, value: f32) {
        debug!("[HAND_REPLAY] {:?} = {}", action, value);
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let mut pose_source = match args.next() {
        Some(path) => {
            info!("[HAND_REPLAY] Replaying {}", path);
            RecordedPoseSource::load(path, false)?
        }
        None => {
            info!("[HAND_REPLAY] No recording given, replaying a synthetic pinch");
            RecordedPoseSource::new(synthetic_pinch(), false)?
        }
    };
    let config = match args.next() {
        Some(path) => HandConfig::load(path)?,
        None => HandConfig::left(),
    };

    let pointer = SceneNode::default().shared();
    let shared_pointer: SharedPointerNode = pointer.clone();

    let mut hand = TrackedHand::new(config);
    hand.register_input_action(PinchFinger::Index, Some(InputActionHandle(0)));
    hand.register_hand_ray(Some(&shared_pointer));
    hand.on_tracking_changed(|event| {
        info!(
            "[HAND_REPLAY] {:?} hand tracked: {}",
            event.handedness, event.tracked
        );
    });

    let mut world = World::new();
    let hand = world.spawn((hand, BoneInstances::default()));

    let mut debug_draw = DebugDrawContext::default();
    let mut input = InputInjectionContext::default();
    let mut was_pinching = false;
    let frame_count = pose_source.frame_count();

    for frame in 0..frame_count {
        tracked_hands_system(
            &mut world,
            &mut pose_source,
            &mut debug_draw,
            &mut input,
            1. / FRAME_RATE,
        );

        let pinching = input.value(InputActionHandle(0)) == Some(1.0);
        if pinching != was_pinching {
            let tracked_hand = world.get::<&TrackedHand>(hand)?;
            info!(
                "[HAND_REPLAY] Frame {}: pinch {} at distance {:.3}",
                frame,
                if pinching { "started" } else { "ended" },
                tracked_hand.pinch_distance(PinchFinger::Index)
            );
            was_pinching = pinching;
        }

        input.apply(&mut LoggingInput);
        debug_draw.clear();
    }

    let pointer = lock(&pointer);
    info!(
        "[HAND_REPLAY] Replayed {} frames, pointer ended at {:?} facing {:?}",
        frame_count, pointer.position, pointer.rotation
    );

    Ok(())
}

fn lock(node: &Arc<Mutex<SceneNode>>) -> SceneNode {
    match node.lock() {
        Ok(node) => *node,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// The index finger closes in on the thumb, opens again, then the hand is lost.
fn synthetic_pinch() -> HandRecording {
    let mut left = (0..SYNTHETIC_FRAMES)
        .map(|i| {
            let t = i as f32 / (SYNTHETIC_FRAMES - 1) as f32;
            let gap = 4. * (t * std::f32::consts::TAU).cos().abs();
            HandPoseSnapshot::at_rest()
                .with_keypoint(Keypoint::Palm, vec3(0., 100., -30.), Quat::IDENTITY)
                .with_keypoint(Keypoint::ThumbTip, vec3(0., 100., -40.), Quat::IDENTITY)
                .with_keypoint(Keypoint::IndexTip, vec3(gap, 100., -40.), Quat::IDENTITY)
                .with_keypoint(Keypoint::MiddleTip, vec3(6., 100., -40.), Quat::IDENTITY)
                .with_keypoint(Keypoint::RingTip, vec3(7., 100., -40.), Quat::IDENTITY)
                .with_keypoint(Keypoint::LittleTip, vec3(8., 100., -40.), Quat::IDENTITY)
        })
        .collect::<Vec<_>>();
    left.extend(std::iter::repeat(HandPoseSnapshot::untracked()).take(LOST_FRAMES));

    HandRecording {
        left,
        right: Vec::new(),
    }
}
