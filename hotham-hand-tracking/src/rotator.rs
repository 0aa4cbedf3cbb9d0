use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

/// An orientation expressed as three independent Euler angles, in degrees.
///
/// Axes follow the OpenXR convention (right handed, Y up):
/// - `pitch` rotates about X
/// - `yaw` rotates about Y
/// - `roll` rotates about Z
///
/// Rotations are applied yaw first, then pitch, then roll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Rotator {
    /// Rotation about the X axis, in degrees
    pub pitch: f32,
    /// Rotation about the Y axis, in degrees
    pub yaw: f32,
    /// Rotation about the Z axis, in degrees
    pub roll: f32,
}

impl Rotator {
    /// No rotation at all.
    pub const ZERO: Rotator = Rotator::new(0., 0., 0.);

    /// Create a new rotator from angles in degrees.
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Decompose a quaternion into Euler angles.
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self {
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: roll.to_degrees(),
        }
    }

    /// Compose the Euler angles back into a quaternion.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Wrap every axis into the range (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }

    /// Interpolate each axis independently towards `target`.
    ///
    /// The per-axis delta is wrapped first so every axis travels the short way around. `alpha`
    /// is clamped to `[0, 1]`, so anything past 1 lands exactly on `target`.
    pub fn lerp(self, target: Rotator, alpha: f32) -> Self {
        let alpha = alpha.clamp(0., 1.);
        if alpha >= 1. {
            return target;
        }

        let delta = Rotator::new(
            target.pitch - self.pitch,
            target.yaw - self.yaw,
            target.roll - self.roll,
        )
        .normalized();

        Rotator::new(
            self.pitch + delta.pitch * alpha,
            self.yaw + delta.yaw * alpha,
            self.roll + delta.roll * alpha,
        )
    }
}

fn normalize_axis(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.);
    if wrapped > 180. {
        wrapped - 360.
    } else {
        wrapped
    }
}

impl From<Quat> for Rotator {
    fn from(rotation: Quat) -> Self {
        Rotator::from_quat(rotation)
    }
}

impl From<Rotator> for Quat {
    fn from(rotator: Rotator) -> Self {
        rotator.to_quat()
    }
}
