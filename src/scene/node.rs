use glam::Affine3A;

use crate::scene::NodeKey;
use crate::scene::component::{Component, component_type_id};
use crate::scene::transform::Transform;

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: key of the parent node (`None` only for the scene root)
/// - `children`: ordered list of owned child keys
///
/// Ownership is exclusive parent-to-child: nodes live in the scene's arena
/// and a node's subtree is destroyed with it. The parent link is a plain
/// key, so navigation upward never keeps a subtree alive, and keys held by
/// external code simply stop resolving after removal.
///
/// # Components
///
/// Every node owns a [`Transform`] by construction (hot data, accessed every
/// frame) plus an ordered list of behavior components updated and drawn in
/// attachment order. Nothing enforces component uniqueness per node; that is
/// the caller's responsibility.
pub struct Node {
    /// Display name; also the bind target for animation tracks.
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Behaviors ===
    pub(crate) components: Vec<Box<dyn Component>>,
}

impl Node {
    /// Creates a detached node with a default transform and no components.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            components: Vec::new(),
        }
    }

    /// Returns the parent node key, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Returns a read-only slice of child node keys.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Appends a behavior component. Components update and draw in
    /// attachment order.
    pub fn add_component<T: Component>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Typed component lookup: linear scan over attached components
    /// comparing type tags. Returns `None` when no component of type `T`
    /// is attached.
    #[must_use]
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        let id = component_type_id::<T>();
        self.components
            .iter()
            .find(|c| c.type_tag() == id)
            .and_then(|c| c.as_any().downcast_ref())
    }

    /// Mutable variant of [`Self::get_component`].
    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let id = component_type_id::<T>();
        self.components
            .iter_mut()
            .find(|c| c.type_tag() == id)
            .and_then(|c| c.as_any_mut().downcast_mut())
    }

    /// Number of attached behavior components.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns a reference to the world transformation matrix.
    ///
    /// Valid after the scene's hierarchy pass for the current frame.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
