use std::any::Any;

use crate::animation::action::AnimationAction;
use crate::scene::component::{Component, ComponentTypeId, UpdateContext, component_type_id};
use crate::scene::{NodeKey, Scene, SkeletonKey};

/// Drives one animation action on one skeleton.
///
/// Each tick the action's clock advances by scaled frame time and the
/// sampled pose is written into the target skeleton, leaving its joint
/// matrices ready for any skinned mesh bound to it this frame. The target
/// is held by pool key; if it stops resolving the clock still runs but no
/// pose is written.
pub struct Animator {
    pub action: AnimationAction,
    pub skeleton: SkeletonKey,
}

impl Animator {
    /// Binds the action against the target skeleton and wraps both up.
    pub fn new(mut action: AnimationAction, skeleton: SkeletonKey, scene: &Scene) -> Self {
        if let Some(target) = scene.skeletons.get(skeleton) {
            action.bind(target);
        } else {
            log::warn!(
                "Animator for clip '{}' created with a stale skeleton key",
                action.clip().name
            );
        }
        Self { action, skeleton }
    }
}

impl Component for Animator {
    fn type_tag(&self) -> ComponentTypeId {
        component_type_id::<Self>()
    }

    fn update(&mut self, scene: &mut Scene, _node: NodeKey, ctx: &UpdateContext<'_>) {
        self.action.update(ctx.dt);
        if let Some(skeleton) = scene.skeletons.get_mut(self.skeleton) {
            self.action.apply_to(skeleton);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
