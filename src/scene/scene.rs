use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::SlotMap;

use crate::input::InputState;
use crate::renderer::RenderBackend;
use crate::resources::mesh::Mesh;
use crate::scene::component::UpdateContext;
use crate::scene::node::Node;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform_system;
use crate::scene::{MeshKey, NodeKey, SkeletonKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Pure data layer: a node arena with exactly one root, plus pools for the
/// resources nodes reference by key (meshes, skeletons). Nodes own their
/// subtrees outright; external code holds generational keys that stop
/// resolving once a node is removed, so there are no dangling back-references
/// to invalidate by hand.
pub struct Scene {
    pub id: u32,

    pub(crate) nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,

    // ==== Resource pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub skeletons: SlotMap<SkeletonKey, Skeleton>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene containing only its root node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("Root"));

        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes,
            root,
            meshes: SlotMap::with_key(),
            skeletons: SlotMap::with_key(),
        }
    }

    /// Key of the scene's root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Creates a new node as a child of `parent`, establishing both links.
    ///
    /// Falls back to the scene root when `parent` no longer resolves.
    pub fn create_child(&mut self, parent: NodeKey, name: &str) -> NodeKey {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            log::warn!("create_child: parent key is stale, attaching '{name}' to the root");
            self.root
        };

        let mut node = Node::new(name);
        node.parent = Some(parent);
        let key = self.nodes.insert(node);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        key
    }

    /// Removes a node and its entire subtree.
    ///
    /// The root node cannot be removed. Keys into the removed subtree stop
    /// resolving immediately.
    pub fn remove_node(&mut self, key: NodeKey) {
        if key == self.root {
            log::warn!("Cannot remove the scene root");
            return;
        }

        // Take the child list first to avoid borrow conflicts.
        let children = if let Some(node) = self.nodes.get(key) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        // Unlink from the parent.
        let parent_opt = self.nodes.get(key).and_then(|n| n.parent);
        if let Some(parent_key) = parent_opt {
            if let Some(parent) = self.nodes.get_mut(parent_key) {
                if let Some(pos) = parent.children.iter().position(|&x| x == key) {
                    parent.children.remove(pos);
                }
            }
        }

        self.nodes.remove(key);
    }

    /// Reparents `child` under `parent`, detaching it from its old parent.
    ///
    /// Refused with a warning when the move would reparent the root or link
    /// a node under its own subtree.
    pub fn attach(&mut self, child: NodeKey, parent: NodeKey) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if child == self.root {
            log::warn!("Cannot reparent the scene root");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }

        // Refuse when the new parent sits inside the child's own subtree;
        // linking there would create a cycle and traversal would never
        // terminate.
        let mut cursor = Some(parent);
        while let Some(key) = cursor {
            if key == child {
                log::warn!("Cannot attach node under its own descendant!");
                return;
            }
            cursor = self.nodes.get(key).and_then(|n| n.parent);
        }

        // 1. Detach from the old parent.
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p) {
                if let Some(i) = n.children.iter().position(|&x| x == child) {
                    n.children.remove(i);
                }
            }
        }

        // 2. Attach to the new one.
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }

        // 3. Update the child link and force a matrix refresh.
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    #[must_use]
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn get_node_mut(&mut self, key: NodeKey) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Depth-first search for the first node with the given name.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeKey> {
        self.find_node_from(self.root, name)
    }

    fn find_node_from(&self, current: NodeKey, name: &str) -> Option<NodeKey> {
        let node = self.nodes.get(current)?;
        if node.name == name {
            return Some(current);
        }
        for &child in &node.children {
            if let Some(found) = self.find_node_from(child, name) {
                return Some(found);
            }
        }
        None
    }

    // ========================================================================
    // Resource pools
    // ========================================================================

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn remove_mesh(&mut self, key: MeshKey) {
        self.meshes.remove(key);
    }

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    pub fn remove_skeleton(&mut self, key: SkeletonKey) {
        self.skeletons.remove(key);
    }

    // ========================================================================
    // Frame tick
    // ========================================================================

    /// Advances the scene by one frame.
    ///
    /// Components update depth-first pre-order (a node's components, in
    /// attachment order, before its children), then one hierarchy pass
    /// refreshes world matrices so draw sees this frame's placements.
    ///
    /// Precondition: component updates must not restructure the tree being
    /// traversed (see [`crate::scene::component::Component`]).
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let ctx = UpdateContext { dt, input };
        self.update_node(self.root, &ctx);
        self.update_matrix_world();
    }

    fn update_node(&mut self, key: NodeKey, ctx: &UpdateContext<'_>) {
        // Detach the component list so components can receive `&mut Scene`.
        let mut components = match self.nodes.get_mut(key) {
            Some(n) => std::mem::take(&mut n.components),
            None => return,
        };

        for component in &mut components {
            component.update(self, key, ctx);
        }

        if let Some(n) = self.nodes.get_mut(key) {
            n.components = components;
        }

        let children = self
            .nodes
            .get(key)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.update_node(child, ctx);
        }
    }

    /// Draws the scene through the render backend, same traversal order as
    /// [`Self::update`].
    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        self.draw_node(self.root, backend);
    }

    fn draw_node(&mut self, key: NodeKey, backend: &mut dyn RenderBackend) {
        let components = match self.nodes.get_mut(key) {
            Some(n) => std::mem::take(&mut n.components),
            None => return,
        };

        for component in &components {
            component.draw(self, key, backend);
        }

        if let Some(n) = self.nodes.get_mut(key) {
            n.components = components;
        }

        let children = self
            .nodes
            .get(key)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.draw_node(child, backend);
        }
    }

    /// Refreshes world matrices for the whole tree.
    ///
    /// Uses the iterative pass to stay safe on deep hierarchies.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, self.root);
    }

    /// Refreshes world matrices for one subtree only.
    pub fn update_subtree(&mut self, root: NodeKey) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}
