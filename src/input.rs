//! Input snapshot.
//!
//! The host samples whatever windowing layer it uses into this plain value
//! once per tick; components read it through the update context and never
//! see window events directly.

use glam::{Vec2, Vec3};

/// Per-tick input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Desired movement in the controlled node's local frame
    /// (x right, y up, z forward), each axis in `[-1, 1]`.
    pub move_axis: Vec3,
    /// Look delta for this tick (x yaw, y pitch), in radians before
    /// sensitivity scaling.
    pub look_axis: Vec2,
}
