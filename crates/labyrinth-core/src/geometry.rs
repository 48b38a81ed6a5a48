//! Viewpoint geometry used by camera transitions.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate.
    pub z: f32,
}

impl Vec3 {
    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation towards `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Camera position and orientation. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Eye position.
    pub position: Vec3,
    /// Rotation around the vertical axis.
    #[serde(default)]
    pub yaw: f32,
    /// Rotation around the lateral axis.
    #[serde(default)]
    pub pitch: f32,
}

impl Pose {
    /// Creates a pose.
    #[must_use]
    pub const fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Interpolates towards `other`; yaw takes the shortest arc.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let yaw_delta = shortest_arc(self.yaw, other.yaw);
        Self {
            position: self.position.lerp(other.position, t),
            yaw: self.yaw + yaw_delta * t,
            pitch: self.pitch + (other.pitch - self.pitch) * t,
        }
    }
}

/// Signed angular difference from `from` to `to` in `(-180, 180]`.
#[must_use]
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Cubic ease-in-out on `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
