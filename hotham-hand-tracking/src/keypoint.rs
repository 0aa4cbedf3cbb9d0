#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Number of keypoints in a tracked hand.
pub const KEYPOINT_COUNT: usize = 26;

/// One of the named skeletal landmarks of a tracked hand.
///
/// The discriminants follow the OpenXR `XR_EXT_hand_tracking` joint order, so a keypoint can be
/// used directly as an index into the arrays of a [`crate::HandPoseSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[repr(u8)]
pub enum Keypoint {
    Palm,
    Wrist,
    ThumbMetacarpal,
    ThumbProximal,
    ThumbDistal,
    ThumbTip,
    IndexMetacarpal,
    IndexProximal,
    IndexIntermediate,
    IndexDistal,
    IndexTip,
    MiddleMetacarpal,
    MiddleProximal,
    MiddleIntermediate,
    MiddleDistal,
    MiddleTip,
    RingMetacarpal,
    RingProximal,
    RingIntermediate,
    RingDistal,
    RingTip,
    LittleMetacarpal,
    LittleProximal,
    LittleIntermediate,
    LittleDistal,
    LittleTip,
}

use Keypoint::*;

impl Keypoint {
    /// Every keypoint, in index order.
    pub const ALL: [Keypoint; KEYPOINT_COUNT] = [
        Palm,
        Wrist,
        ThumbMetacarpal,
        ThumbProximal,
        ThumbDistal,
        ThumbTip,
        IndexMetacarpal,
        IndexProximal,
        IndexIntermediate,
        IndexDistal,
        IndexTip,
        MiddleMetacarpal,
        MiddleProximal,
        MiddleIntermediate,
        MiddleDistal,
        MiddleTip,
        RingMetacarpal,
        RingProximal,
        RingIntermediate,
        RingDistal,
        RingTip,
        LittleMetacarpal,
        LittleProximal,
        LittleIntermediate,
        LittleDistal,
        LittleTip,
    ];

    /// The five fingertips.
    pub const TIPS: [Keypoint; 5] = [ThumbTip, IndexTip, MiddleTip, RingTip, LittleTip];

    /// Index of this keypoint into per-keypoint arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a keypoint by its index, if it is in range.
    pub fn from_index(index: usize) -> Option<Keypoint> {
        Self::ALL.get(index).copied()
    }

    /// The kinematic parent of this keypoint. Only the wrist has none.
    #[inline]
    pub const fn parent(self) -> Option<Keypoint> {
        PARENT_CHAIN[self.index()]
    }

    /// Is this one of the five fingertips?
    pub fn is_tip(self) -> bool {
        Self::TIPS.contains(&self)
    }
}

/// Kinematic parent of each keypoint, indexed by [`Keypoint::index`].
///
/// Every finger chain runs from its tip back through its metacarpal into the palm, and the palm
/// is parented to the wrist, the unique root.
pub const PARENT_CHAIN: [Option<Keypoint>; KEYPOINT_COUNT] = [
    Some(Wrist), // Palm
    None,        // Wrist
    Some(Palm),
    Some(ThumbMetacarpal),
    Some(ThumbProximal),
    Some(ThumbDistal),
    Some(Palm),
    Some(IndexMetacarpal),
    Some(IndexProximal),
    Some(IndexIntermediate),
    Some(IndexDistal),
    Some(Palm),
    Some(MiddleMetacarpal),
    Some(MiddleProximal),
    Some(MiddleIntermediate),
    Some(MiddleDistal),
    Some(Palm),
    Some(RingMetacarpal),
    Some(RingProximal),
    Some(RingIntermediate),
    Some(RingDistal),
    Some(Palm),
    Some(LittleMetacarpal),
    Some(LittleProximal),
    Some(LittleIntermediate),
    Some(LittleDistal),
];

/// A digit of the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Finger {
    /// All five fingers, thumb first.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Little,
    ];

    /// First keypoint of the finger's chain.
    pub const fn metacarpal(self) -> Keypoint {
        match self {
            Finger::Thumb => ThumbMetacarpal,
            Finger::Index => IndexMetacarpal,
            Finger::Middle => MiddleMetacarpal,
            Finger::Ring => RingMetacarpal,
            Finger::Little => LittleMetacarpal,
        }
    }

    /// Last keypoint of the finger's chain.
    pub const fn tip(self) -> Keypoint {
        match self {
            Finger::Thumb => ThumbTip,
            Finger::Index => IndexTip,
            Finger::Middle => MiddleTip,
            Finger::Ring => RingTip,
            Finger::Little => LittleTip,
        }
    }
}

/// A finger that can pinch against the thumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PinchFinger {
    Index,
    Middle,
    Ring,
    Little,
}

impl PinchFinger {
    /// Number of pinchable fingers.
    pub const COUNT: usize = 4;

    /// All pinchable fingers, in registry order.
    pub const ALL: [PinchFinger; PinchFinger::COUNT] = [
        PinchFinger::Index,
        PinchFinger::Middle,
        PinchFinger::Ring,
        PinchFinger::Little,
    ];

    /// Index of this finger into the input action registry.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The keypoint that is measured against the thumb tip.
    pub const fn tip(self) -> Keypoint {
        match self {
            PinchFinger::Index => IndexTip,
            PinchFinger::Middle => MiddleTip,
            PinchFinger::Ring => RingTip,
            PinchFinger::Little => LittleTip,
        }
    }
}

impl From<PinchFinger> for Finger {
    fn from(finger: PinchFinger) -> Self {
        match finger {
            PinchFinger::Index => Finger::Index,
            PinchFinger::Middle => Finger::Middle,
            PinchFinger::Ring => Finger::Ring,
            PinchFinger::Little => Finger::Little,
        }
    }
}
