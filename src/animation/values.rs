//! Interpolatable value types for keyframe tracks.

use glam::{Quat, Vec3};

/// A value a keyframe track can store and blend between.
pub trait Interpolatable: Copy {
    /// Interpolates from `self` toward `other` by `t` in `[0, 1]`.
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Vec3 {
    #[inline]
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolatable for Quat {
    /// Spherical interpolation; keeps the result on the unit sphere and
    /// takes the shortest arc.
    #[inline]
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.slerp(other, t)
    }
}
