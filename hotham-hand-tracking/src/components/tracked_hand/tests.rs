use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use approx::assert_relative_eq;
use glam::{vec3, Quat, Vec3};

use super::*;
use crate::{
    components::pointer_ray::SceneNode,
    config::HandRendering,
    contexts::{BoneInstances, DebugDrawContext, InputInjectionContext},
};

const DELTA_TIME: f32 = 1. / 72.;

#[derive(Default)]
struct Frame {
    instances: BoneInstances,
    debug_draw: DebugDrawContext,
    input: InputInjectionContext,
}

impl Frame {
    fn update(&mut self, hand: &mut TrackedHand, snapshot: &HandPoseSnapshot) -> bool {
        self.debug_draw.clear();
        self.input.injections_this_frame.clear();
        let mut outputs = HandOutputs::new(&mut self.instances, &mut self.debug_draw, &mut self.input);
        hand.update_hand(snapshot, DELTA_TIME, &mut outputs)
    }
}

/// A tracked hand with every keypoint at a distinct position and rotation.
fn spread_hand() -> HandPoseSnapshot {
    let mut snapshot = HandPoseSnapshot::at_rest();
    for keypoint in Keypoint::ALL {
        let i = keypoint.index() as f32;
        snapshot.positions[keypoint.index()] = vec3(i, i * 0.5, -i);
        snapshot.rotations[keypoint.index()] =
            Quat::from_rotation_y(i * 0.1) * Quat::from_rotation_x(i * 0.05);
        snapshot.radii[keypoint.index()] = 1. + i;
    }
    snapshot
}

fn pinch_snapshot(index_tip: Vec3) -> HandPoseSnapshot {
    HandPoseSnapshot::at_rest()
        .with_keypoint(Keypoint::ThumbTip, Vec3::ZERO, Quat::IDENTITY)
        .with_keypoint(Keypoint::IndexTip, index_tip, Quat::IDENTITY)
        .with_keypoint(Keypoint::MiddleTip, vec3(5., 0., 0.), Quat::IDENTITY)
        .with_keypoint(Keypoint::RingTip, vec3(6., 0., 0.), Quat::IDENTITY)
        .with_keypoint(Keypoint::LittleTip, vec3(7., 0., 0.), Quat::IDENTITY)
}

#[test]
pub fn test_first_update_untracked_leaves_initial_state() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();

    assert!(!frame.update(&mut hand, &HandPoseSnapshot::untracked()));
    assert!(!hand.is_hand_tracked());
    for keypoint in Keypoint::ALL {
        assert_eq!(hand.bone_location(keypoint), Vec3::ZERO);
        assert_eq!(hand.bone_rotation(keypoint), Quat::IDENTITY);
        assert_eq!(hand.bone_relative_rotation(keypoint), Quat::IDENTITY);
    }
    assert!(frame.instances.is_empty());
    assert_eq!(hand.hand_transform(), hand.config.fallback_transform);
}

#[test]
pub fn test_ingests_every_keypoint() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    let snapshot = spread_hand();

    assert!(frame.update(&mut hand, &snapshot));
    assert!(hand.is_hand_tracked());
    for keypoint in Keypoint::ALL {
        assert_eq!(hand.bone_location(keypoint), snapshot.positions[keypoint.index()]);
        assert_eq!(hand.bone_rotation(keypoint), snapshot.rotations[keypoint.index()]);
    }

    let palm = hand.hand_transform();
    assert_eq!(palm.translation, snapshot.positions[Keypoint::Palm.index()]);
    assert_eq!(palm.rotation, snapshot.rotations[Keypoint::Palm.index()]);
}

#[test]
pub fn test_tracking_loss_retains_last_pose() {
    let mut hand = TrackedHand::left();
    let mut frame = Frame::default();
    let snapshot = spread_hand();

    frame.update(&mut hand, &snapshot);
    let locations = Keypoint::ALL.map(|k| hand.bone_location(k));
    let rotations = Keypoint::ALL.map(|k| hand.bone_rotation(k));

    // A lost hand usually reports garbage alongside the invalid flag.
    let mut lost = HandPoseSnapshot::at_rest();
    lost.valid = false;
    assert!(!frame.update(&mut hand, &lost));

    assert_eq!(Keypoint::ALL.map(|k| hand.bone_location(k)), locations);
    assert_eq!(Keypoint::ALL.map(|k| hand.bone_rotation(k)), rotations);
    assert!(frame.instances.is_empty());
    assert_eq!(hand.hand_transform(), hand.config.fallback_transform);
}

#[test]
pub fn test_bone_instances() {
    let mut hand = TrackedHand::new(HandConfig {
        bone_scale: 0.5,
        ..Default::default()
    });
    let mut frame = Frame::default();
    let snapshot = spread_hand();

    frame.update(&mut hand, &snapshot);
    assert_eq!(frame.instances.len(), KEYPOINT_COUNT);

    let index_tip = frame.instances.instances()[Keypoint::IndexTip.index()];
    let (scale, rotation, translation) = index_tip.transform.to_scale_rotation_translation();
    let expected_scale = snapshot.radii[Keypoint::IndexTip.index()] * 0.5;
    assert!(index_tip.visible);
    assert_relative_eq!(scale, Vec3::splat(expected_scale), epsilon = 1e-4);
    assert_relative_eq!(translation, snapshot.positions[Keypoint::IndexTip.index()], epsilon = 1e-4);
    // The decomposed quaternion may come back with its sign flipped.
    let expected_rotation = snapshot.rotations[Keypoint::IndexTip.index()];
    assert_relative_eq!(rotation.dot(expected_rotation).abs(), 1.0, epsilon = 1e-4);

    // Instances are cleared at the start of every frame, tracked or not.
    frame.update(&mut hand, &snapshot);
    assert_eq!(frame.instances.len(), KEYPOINT_COUNT);
    frame.update(&mut hand, &HandPoseSnapshot::untracked());
    assert!(frame.instances.is_empty());
}

#[test]
pub fn test_only_display_tips() {
    let mut hand = TrackedHand::new(HandConfig {
        only_display_tips: true,
        ..Default::default()
    });
    let mut frame = Frame::default();
    let snapshot = spread_hand();

    frame.update(&mut hand, &snapshot);
    assert_eq!(frame.instances.len(), 5);
    let translations = frame
        .instances
        .instances()
        .iter()
        .map(|i| Vec3::from(i.transform.translation))
        .collect::<Vec<_>>();
    for tip in Keypoint::TIPS {
        assert!(translations.contains(&snapshot.positions[tip.index()]));
    }

    // Bones are still ingested even though they aren't drawn.
    assert_eq!(
        hand.bone_location(Keypoint::IndexDistal),
        snapshot.positions[Keypoint::IndexDistal.index()]
    );
}

#[test]
pub fn test_hide_hand() {
    let mut hand = TrackedHand::new(HandConfig {
        hide_hand: true,
        rendering: HandRendering::Both,
        ..Default::default()
    });
    let mut frame = Frame::default();

    assert!(frame.update(&mut hand, &spread_hand()));
    assert!(frame.instances.is_empty());
    assert!(frame.debug_draw.lines.is_empty());
    assert!(frame.debug_draw.spheres.is_empty());
    assert_eq!(hand.bone_location(Keypoint::LittleTip), vec3(25., 12.5, -25.));
}

#[test]
pub fn test_wireframe() {
    let mut hand = TrackedHand::new(HandConfig {
        rendering: HandRendering::Wireframe,
        ..Default::default()
    });
    let mut frame = Frame::default();
    let snapshot = spread_hand();

    frame.update(&mut hand, &snapshot);
    assert!(frame.instances.is_empty());

    // Per finger: two palm connectives, then one segment per joint after the metacarpal.
    // The thumb has 3 segments, the other fingers 4.
    let segments = 3 + 4 * 4;
    assert_eq!(frame.debug_draw.lines.len(), 5 * 2 + segments);
    assert_eq!(frame.debug_draw.spheres.len(), segments);

    let positions = &snapshot.positions;
    let first = frame.debug_draw.lines[0];
    assert_eq!(first.start, positions[Keypoint::Palm.index()]);
    assert_eq!(first.end, positions[Keypoint::Wrist.index()]);
    assert_eq!(first.color, hand.config.wireframe.color);
    assert_eq!(first.thickness, hand.config.wireframe.thickness);
    let second = frame.debug_draw.lines[1];
    assert_eq!(second.start, positions[Keypoint::Wrist.index()]);
    assert_eq!(second.end, positions[Keypoint::ThumbMetacarpal.index()]);
    let third = frame.debug_draw.lines[2];
    assert_eq!(third.start, positions[Keypoint::ThumbMetacarpal.index()]);
    assert_eq!(third.end, positions[Keypoint::ThumbProximal.index()]);

    let first_sphere = frame.debug_draw.spheres[0];
    assert_eq!(first_sphere.center, positions[Keypoint::ThumbProximal.index()]);
    assert_eq!(first_sphere.radius, snapshot.radii[Keypoint::ThumbProximal.index()]);
}

#[test]
pub fn test_wireframe_toggles() {
    let mut config = HandConfig {
        rendering: HandRendering::Both,
        ..Default::default()
    };
    config.wireframe.render_palm = false;
    config.wireframe.render_bones = false;
    let mut hand = TrackedHand::new(config);
    let mut frame = Frame::default();

    frame.update(&mut hand, &spread_hand());
    assert_eq!(frame.instances.len(), KEYPOINT_COUNT);
    assert_eq!(frame.debug_draw.lines.len(), 3 + 4 * 4);
    assert!(frame.debug_draw.spheres.is_empty());
}

#[test]
pub fn test_malformed_snapshot_skips_wireframe_only() {
    let mut hand = TrackedHand::new(HandConfig {
        rendering: HandRendering::Both,
        ..Default::default()
    });
    let mut frame = Frame::default();
    let mut snapshot = spread_hand();
    snapshot.radii.truncate(KEYPOINT_COUNT - 1);

    assert!(frame.update(&mut hand, &snapshot));
    assert!(frame.debug_draw.lines.is_empty());
    assert_eq!(frame.instances.len(), KEYPOINT_COUNT - 1);
    assert_eq!(
        hand.bone_location(Keypoint::LittleDistal),
        snapshot.positions[Keypoint::LittleDistal.index()]
    );
    // The last keypoint had no radius, so it was left alone.
    assert_eq!(hand.bone_location(Keypoint::LittleTip), Vec3::ZERO);
}

#[test]
pub fn test_render_finger_rejects_out_of_range_indices() {
    let hand = TrackedHand::new(HandConfig {
        rendering: HandRendering::Wireframe,
        ..Default::default()
    });
    let snapshot = spread_hand();
    let mut debug_draw = DebugDrawContext::default();

    hand.render_finger(&snapshot, 0, Keypoint::ThumbTip.index(), &mut debug_draw);
    hand.render_finger(&snapshot, Keypoint::IndexMetacarpal.index(), KEYPOINT_COUNT, &mut debug_draw);
    assert!(debug_draw.lines.is_empty());

    hand.render_finger(
        &snapshot,
        Keypoint::IndexMetacarpal.index(),
        Keypoint::IndexTip.index(),
        &mut debug_draw,
    );
    assert_eq!(debug_draw.lines.len(), 2 + 4);
}

#[test]
pub fn test_bone_rotator() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    let palm = Rotator::new(20., 30., 10.);
    let snapshot =
        HandPoseSnapshot::at_rest().with_keypoint(Keypoint::Palm, Vec3::ONE, palm.to_quat());

    assert!(frame.update(&mut hand, &snapshot));
    let readout = hand.bone_rotator(Keypoint::Palm);
    assert_relative_eq!(readout.pitch, 20., epsilon = 1e-3);
    assert_relative_eq!(readout.yaw, 30., epsilon = 1e-3);
    assert_relative_eq!(readout.roll, 10., epsilon = 1e-3);

    let wrist = hand.bone_rotator(Keypoint::Wrist);
    assert_relative_eq!(wrist.pitch, 0., epsilon = 1e-3);
    assert_relative_eq!(wrist.yaw, 0., epsilon = 1e-3);
    assert_relative_eq!(wrist.roll, 0., epsilon = 1e-3);
}

#[test]
pub fn test_pinch() {
    let mut hand = TrackedHand::new(HandConfig {
        pinch_threshold: 1.5,
        ..Default::default()
    });
    let mut frame = Frame::default();

    frame.update(&mut hand, &pinch_snapshot(vec3(1., 0., 0.)));
    assert!(hand.is_pinching(PinchFinger::Index));
    assert!(!hand.is_pinching(PinchFinger::Middle));

    frame.update(&mut hand, &pinch_snapshot(vec3(2., 0., 0.)));
    assert!(!hand.is_pinching(PinchFinger::Index));
}

#[test]
pub fn test_pinch_threshold_is_inclusive() {
    let threshold = 1.5;
    let mut hand = TrackedHand::new(HandConfig {
        pinch_threshold: threshold,
        ..Default::default()
    });
    let mut frame = Frame::default();

    frame.update(&mut hand, &pinch_snapshot(vec3(0., threshold, 0.)));
    assert_eq!(hand.pinch_distance(PinchFinger::Index), threshold);
    assert!(hand.is_pinching(PinchFinger::Index));

    frame.update(&mut hand, &pinch_snapshot(vec3(0., threshold + 1e-3, 0.)));
    assert!(!hand.is_pinching(PinchFinger::Index));
}

#[test]
pub fn test_pinch_injection() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    let index_action = InputActionHandle(1);
    let ring_action = InputActionHandle(3);
    hand.register_input_action(PinchFinger::Index, Some(index_action));
    hand.register_input_action(PinchFinger::Ring, Some(ring_action));

    frame.update(&mut hand, &pinch_snapshot(vec3(1., 0., 0.)));
    assert_eq!(frame.input.injections_this_frame.len(), 2);
    assert_eq!(frame.input.value(index_action), Some(1.0));
    assert_eq!(frame.input.value(ring_action), Some(0.0));

    frame.update(&mut hand, &pinch_snapshot(vec3(2., 0., 0.)));
    assert_eq!(frame.input.value(index_action), Some(0.0));

    // Nothing is injected while the hand is lost.
    frame.update(&mut hand, &HandPoseSnapshot::untracked());
    assert!(frame.input.injections_this_frame.is_empty());

    hand.register_input_action(PinchFinger::Index, None);
    frame.update(&mut hand, &pinch_snapshot(vec3(1., 0., 0.)));
    assert_eq!(frame.input.value(index_action), None);
    assert_eq!(frame.input.injections_this_frame.len(), 1);
}

#[test]
pub fn test_tracking_changed_fires_once_per_transition() {
    let mut hand = TrackedHand::left();
    let mut frame = Frame::default();
    let events = Arc::new(Mutex::new(Vec::new()));
    let received = events.clone();
    hand.on_tracking_changed(move |event| received.lock().unwrap().push(event));
    let take = || std::mem::take(&mut *events.lock().unwrap());

    let tracked = spread_hand();
    let lost = HandPoseSnapshot::untracked();

    frame.update(&mut hand, &lost);
    assert!(take().is_empty());

    frame.update(&mut hand, &tracked);
    frame.update(&mut hand, &tracked);
    assert_eq!(
        take(),
        vec![TrackingChanged {
            handedness: Handedness::Left,
            tracked: true
        }]
    );

    frame.update(&mut hand, &lost);
    frame.update(&mut hand, &lost);
    assert_eq!(
        take(),
        vec![TrackingChanged {
            handedness: Handedness::Left,
            tracked: false
        }]
    );
}

#[test]
pub fn test_every_observer_is_notified() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    let calls = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let calls = calls.clone();
        hand.on_tracking_changed(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
    }

    frame.update(&mut hand, &spread_hand());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
pub fn test_relative_rotations() {
    let mut hand = TrackedHand::new(HandConfig {
        compute_relative_rotations: true,
        ..Default::default()
    });
    let mut frame = Frame::default();
    frame.update(&mut hand, &spread_hand());

    assert_eq!(
        hand.bone_relative_rotation(Keypoint::Wrist),
        hand.bone_rotation(Keypoint::Wrist)
    );

    for keypoint in Keypoint::ALL {
        let Some(parent) = keypoint.parent() else {
            continue;
        };
        let rebuilt = hand.bone_rotation(parent) * hand.bone_relative_rotation(keypoint);
        assert_relative_eq!(rebuilt, hand.bone_rotation(keypoint), epsilon = 1e-5);
    }
}

#[test]
pub fn test_relative_rotations_disabled() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    frame.update(&mut hand, &spread_hand());
    assert_eq!(hand.bone_relative_rotation(Keypoint::IndexTip), Quat::IDENTITY);
}

#[test]
pub fn test_relative_rotation_of_aligned_bones_is_identity() {
    let rotations = [Quat::from_rotation_z(0.7); KEYPOINT_COUNT];
    let relative = relative_rotations(&rotations);
    assert_eq!(relative[Keypoint::Wrist.index()], rotations[0]);
    for keypoint in Keypoint::ALL.into_iter().filter(|k| *k != Keypoint::Wrist) {
        assert_relative_eq!(relative[keypoint.index()], Quat::IDENTITY, epsilon = 1e-6);
    }
}

#[test]
pub fn test_pointer_follows_palm_with_hand() {
    let mut hand = TrackedHand::right();
    hand.config.pointer.angle_from_palm = 0.;
    let mut frame = Frame::default();
    let node = SceneNode::default().shared();
    let shared: SharedPointerNode = node.clone();
    hand.register_hand_ray(Some(&shared));
    assert!(hand.config.pointer.enabled);

    let snapshot = HandPoseSnapshot::at_rest().with_keypoint(
        Keypoint::Palm,
        vec3(0., 0., -1.),
        Quat::IDENTITY,
    );
    frame.update(&mut hand, &snapshot);

    let alpha = DELTA_TIME * hand.config.pointer.location_speed;
    let position = node.lock().unwrap().position;
    assert_relative_eq!(position, vec3(0., 0., -alpha), epsilon = 1e-6);

    // Losing the hand leaves the pointer where it was.
    frame.update(&mut hand, &HandPoseSnapshot::untracked());
    assert_eq!(node.lock().unwrap().position, position);
}

#[test]
pub fn test_pointer_updated_by_host() {
    let mut hand = TrackedHand::right();
    hand.config.pointer.update_with_hand = false;
    let mut frame = Frame::default();
    let node = SceneNode::default().shared();
    let shared: SharedPointerNode = node.clone();
    hand.register_hand_ray(Some(&shared));

    let snapshot =
        HandPoseSnapshot::at_rest().with_keypoint(Keypoint::Palm, Vec3::X, Quat::IDENTITY);
    frame.update(&mut hand, &snapshot);
    assert_eq!(node.lock().unwrap().position, Vec3::ZERO);

    for _ in 0..500 {
        assert!(hand.update_pointer_ray(DELTA_TIME));
    }
    assert_relative_eq!(node.lock().unwrap().position, Vec3::X, epsilon = 1e-4);
    assert_relative_eq!(node.lock().unwrap().rotation.pitch, 45., epsilon = 1e-3);

    hand.register_hand_ray(None);
    assert!(!hand.config.pointer.enabled);
    assert!(!hand.update_pointer_ray(DELTA_TIME));
}

#[test]
pub fn test_pointer_visibility_follows_tracking() {
    let mut hand = TrackedHand::right();
    hand.config.pointer.hide_when_untracked = true;
    let mut frame = Frame::default();
    let node = SceneNode::default().shared();
    let shared: SharedPointerNode = node.clone();
    hand.register_hand_ray(Some(&shared));

    frame.update(&mut hand, &spread_hand());
    assert!(node.lock().unwrap().visible);

    frame.update(&mut hand, &HandPoseSnapshot::untracked());
    assert!(!node.lock().unwrap().visible);

    frame.update(&mut hand, &spread_hand());
    assert!(node.lock().unwrap().visible);
}

#[test]
pub fn test_pointer_registered_while_untracked_starts_hidden() {
    let mut hand = TrackedHand::right();
    hand.config.pointer.hide_when_untracked = true;
    let mut frame = Frame::default();

    let node = SceneNode::default().shared();
    let shared: SharedPointerNode = node.clone();
    hand.register_hand_ray(Some(&shared));
    assert!(!node.lock().unwrap().visible);

    frame.update(&mut hand, &spread_hand());
    assert!(node.lock().unwrap().visible);

    // Registering while tracked leaves the new node shown.
    let other = SceneNode {
        visible: false,
        ..Default::default()
    }
    .shared();
    let shared: SharedPointerNode = other.clone();
    hand.register_hand_ray(Some(&shared));
    assert!(other.lock().unwrap().visible);
}

#[test]
pub fn test_dropped_pointer_node_is_ignored() {
    let mut hand = TrackedHand::right();
    let mut frame = Frame::default();
    let node: SharedPointerNode = SceneNode::default().shared();
    hand.register_hand_ray(Some(&node));
    drop(node);

    assert!(frame.update(&mut hand, &spread_hand()));
    assert!(!hand.update_pointer_ray(DELTA_TIME));
}
