use std::any::Any;

use glam::{EulerRot, Quat, Vec3};

use crate::scene::component::{Component, ComponentTypeId, UpdateContext, component_type_id};
use crate::scene::{NodeKey, Scene};

// Just shy of straight up/down so the look direction never degenerates.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person style controller.
///
/// Turns the input snapshot into motion of the owning node: look deltas
/// accumulate into yaw and pitch (pitch clamped, roll always zero), and the
/// movement axes translate the node in its own yawed/pitched frame.
#[derive(Debug, Clone)]
pub struct Player {
    /// Units per second.
    pub move_speed: f32,
    /// Radians per unit of look input.
    pub look_speed: f32,

    yaw: f32,
    pitch: f32,
}

impl Player {
    #[must_use]
    pub fn new(move_speed: f32, look_speed: f32) -> Self {
        Self {
            move_speed,
            look_speed,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(5.0, 1.0)
    }
}

impl Component for Player {
    fn type_tag(&self) -> ComponentTypeId {
        component_type_id::<Self>()
    }

    fn update(&mut self, scene: &mut Scene, node: NodeKey, ctx: &UpdateContext<'_>) {
        self.yaw -= ctx.input.look_axis.x * self.look_speed;
        self.pitch = (self.pitch - ctx.input.look_axis.y * self.look_speed)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);

        let axis = ctx.input.move_axis;
        let offset = if axis == Vec3::ZERO {
            Vec3::ZERO
        } else {
            let dir = rotation * Vec3::new(axis.x, axis.y, -axis.z);
            dir.normalize_or_zero() * self.move_speed * ctx.dt
        };

        if let Some(n) = scene.get_node_mut(node) {
            n.transform.rotation = rotation;
            n.transform.position += offset;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
