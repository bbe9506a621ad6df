//! Component model.
//!
//! Behaviors attach to scene nodes through the [`Component`] trait, a small
//! capability set of per-frame hooks (`update`, `draw`) plus a stable
//! per-type integer tag used for typed retrieval.
//!
//! Type tags are assigned lazily from a process-wide counter the first time
//! a concrete component type is seen, and stay stable for the process
//! lifetime. Lookup on a node is a linear scan comparing tags; the concrete
//! reference is only materialized after the tag has already identified the
//! type, so no type introspection drives the dispatch.

use std::any::{Any, TypeId};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::input::InputState;
use crate::renderer::RenderBackend;
use crate::scene::{NodeKey, Scene};

/// Process-wide stable identifier for a concrete component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentTypeId(u32);

static NEXT_COMPONENT_TYPE_ID: AtomicU32 = AtomicU32::new(0);

fn registry() -> &'static RwLock<FxHashMap<TypeId, ComponentTypeId>> {
    static REGISTRY: OnceLock<RwLock<FxHashMap<TypeId, ComponentTypeId>>> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Returns the stable tag for component type `T`, assigning one on first use.
///
/// The slow path (first call per type) takes a write lock; every later call
/// is a read-locked map hit, and nothing in the per-frame hot path touches
/// this at all once components are constructed.
#[must_use]
pub fn component_type_id<T: Component>() -> ComponentTypeId {
    let key = TypeId::of::<T>();

    if let Some(&id) = registry().read().get(&key) {
        return id;
    }

    let mut map = registry().write();
    *map.entry(key)
        .or_insert_with(|| ComponentTypeId(NEXT_COMPONENT_TYPE_ID.fetch_add(1, Ordering::Relaxed)))
}

/// Per-frame data handed to component updates.
pub struct UpdateContext<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// Input snapshot for this tick, filled by the host.
    pub input: &'a InputState,
}

/// A behavior attachable to a scene node.
///
/// Both hooks default to no-ops; concrete components override what they
/// need. During traversal the component list is temporarily detached from
/// its node, which is why hooks receive the scene and the owning node's key
/// instead of `&mut Node`.
///
/// Precondition: hooks must not restructure the tree being traversed
/// (create/remove/attach nodes, add/remove components). Such mutations
/// during traversal are unsupported.
pub trait Component: Any {
    /// The tag assigned by [`component_type_id`] for the concrete type.
    fn type_tag(&self) -> ComponentTypeId;

    /// Per-frame logic hook, called before the node's children update.
    fn update(&mut self, _scene: &mut Scene, _node: NodeKey, _ctx: &UpdateContext<'_>) {}

    /// Per-frame render hook, called before the node's children draw.
    fn draw(&self, _scene: &Scene, _node: NodeKey, _backend: &mut dyn RenderBackend) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
