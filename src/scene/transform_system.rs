//! Transform system.
//!
//! Hierarchical world-matrix updates for the scene graph, decoupled from
//! `Scene` so the pass only borrows the node arena and the root handle.
//!
//! The pass walks the tree top-down carrying a `parent_changed` flag: a
//! node's world matrix is recomputed whenever its own TRS changed *or* any
//! ancestor's did. This keeps descendants consistent when a parent moves,
//! instead of trusting a per-node cache that ancestors cannot invalidate.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeKey;
use crate::scene::node::Node;

/// Updates world matrices for the whole tree under `root`.
pub fn update_hierarchy(nodes: &mut SlotMap<NodeKey, Node>, root: NodeKey) {
    update_transform_recursive(nodes, root, Affine3A::IDENTITY, false);
}

/// Iterative variant of [`update_hierarchy`].
///
/// Uses an explicit stack instead of recursion, avoiding stack overflow on
/// deep hierarchies and repeated borrow overhead.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeKey, Node>, root: NodeKey) {
    // Work stack: (node, parent world matrix, did any ancestor change).
    let mut stack: Vec<(NodeKey, Affine3A, bool)> = Vec::with_capacity(64);
    stack.push((root, Affine3A::IDENTITY, false));

    while let Some((node_key, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_key) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;
        let children_count = node.children.len();

        // Push children in reverse so processing order stays depth-first.
        for i in (0..children_count).rev() {
            if let Some(node) = nodes.get(node_key) {
                if let Some(&child_key) = node.children.get(i) {
                    stack.push((child_key, current_world, world_needs_update));
                }
            }
        }
    }
}

/// Updates the subtree rooted at `root`, composing against the parent's
/// current world matrix. Used for local refreshes after reparenting.
pub fn update_subtree(nodes: &mut SlotMap<NodeKey, Node>, root: NodeKey) {
    let parent_world = if let Some(node) = nodes.get(root) {
        if let Some(parent_key) = node.parent {
            nodes
                .get(parent_key)
                .map(|p| p.transform.world_matrix)
                .unwrap_or(Affine3A::IDENTITY)
        } else {
            Affine3A::IDENTITY
        }
    } else {
        return;
    };

    update_transform_recursive(nodes, root, parent_world, true);
}

fn update_transform_recursive(
    nodes: &mut SlotMap<NodeKey, Node>,
    node_key: NodeKey,
    parent_world_matrix: Affine3A,
    parent_changed: bool,
) {
    let (current_world_matrix, children_keys, world_needs_update) = {
        let Some(node) = nodes.get_mut(node_key) else {
            return;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        // Collect before recursing to avoid a second mutable borrow.
        let world = node.transform.world_matrix;
        let children: Vec<NodeKey> = node.children.clone();

        (world, children, world_needs_update)
    };

    for child_key in children_keys {
        update_transform_recursive(nodes, child_key, current_world_matrix, world_needs_update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();

        let mut parent = Node::new("parent");
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_key = nodes.insert(parent);

        let mut child = Node::new("child");
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        child.parent = Some(parent_key);
        let child_key = nodes.insert(child);

        nodes
            .get_mut(parent_key)
            .unwrap()
            .children
            .push(child_key);

        update_hierarchy(&mut nodes, parent_key);

        let child_world_pos = nodes
            .get(child_key)
            .unwrap()
            .transform
            .world_matrix
            .translation;
        assert!((child_world_pos.x - 1.0).abs() < 1e-5);
        assert!((child_world_pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_parent_move_propagates_to_child() {
        let mut nodes: SlotMap<NodeKey, Node> = SlotMap::with_key();

        let parent_key = nodes.insert(Node::new("parent"));
        let mut child = Node::new("child");
        child.parent = Some(parent_key);
        let child_key = nodes.insert(child);
        nodes
            .get_mut(parent_key)
            .unwrap()
            .children
            .push(child_key);

        update_hierarchy_iterative(&mut nodes, parent_key);

        // Move the parent only: the child's world matrix must follow even
        // though its own local TRS is unchanged.
        nodes.get_mut(parent_key).unwrap().transform.position = Vec3::new(0.0, 0.0, 5.0);
        update_hierarchy_iterative(&mut nodes, parent_key);

        let child_world_pos = nodes
            .get(child_key)
            .unwrap()
            .transform
            .world_matrix
            .translation;
        assert!((child_world_pos.z - 5.0).abs() < 1e-5);
    }
}
