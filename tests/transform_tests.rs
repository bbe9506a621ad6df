//! Transform and hierarchy-pass tests.
//!
//! Covers the shadow-state dirty check, world-matrix composition down the
//! tree, propagation of ancestor movement to unchanged descendants, and
//! cache idempotence across no-op passes.

use glam::{Affine3A, Quat, Vec3};
use talon::Scene;
use talon::scene::Transform;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// Dirty check
// ============================================================================

#[test]
fn test_new_transform_needs_initial_update() {
    let mut t = Transform::new();
    assert!(t.update_local_matrix(), "first pass must build the matrix");
    assert!(!t.update_local_matrix(), "second pass with no change is a no-op");
}

#[test]
fn test_field_mutation_is_picked_up() {
    let mut t = Transform::new();
    t.update_local_matrix();

    t.position = Vec3::new(3.0, 0.0, 0.0);
    assert!(t.update_local_matrix());
    assert!(approx_vec3(t.local_matrix().translation.into(), Vec3::new(3.0, 0.0, 0.0)));

    t.rotation = Quat::from_rotation_y(1.0);
    assert!(t.update_local_matrix());

    t.scale = Vec3::splat(2.0);
    assert!(t.update_local_matrix());
}

#[test]
fn test_mark_dirty_forces_recompute() {
    let mut t = Transform::new();
    t.update_local_matrix();
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

// ============================================================================
// World-matrix composition
// ============================================================================

#[test]
fn test_world_matrix_composes_down_the_tree() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(a, "b");
    let c = scene.create_child(b, "c");

    scene.get_node_mut(a).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);
    scene.get_node_mut(b).unwrap().transform.position = Vec3::new(0.0, 2.0, 0.0);
    scene.get_node_mut(c).unwrap().transform.position = Vec3::new(0.0, 0.0, 3.0);

    scene.update_matrix_world();

    let world = scene.get_node(c).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn test_rotation_applies_to_child_position() {
    let mut scene = Scene::new();
    let pivot = scene.create_child(scene.root(), "pivot");
    let tip = scene.create_child(pivot, "tip");

    scene.get_node_mut(pivot).unwrap().transform.rotation =
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
    scene.get_node_mut(tip).unwrap().transform.position = Vec3::new(1.0, 0.0, 0.0);

    scene.update_matrix_world();

    // 90 degrees about Z sends +X to +Y.
    let world = scene.get_node(tip).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(0.0, 1.0, 0.0)));
}

#[test]
fn test_parent_move_reaches_unchanged_descendants() {
    let mut scene = Scene::new();
    let parent = scene.create_child(scene.root(), "parent");
    let child = scene.create_child(parent, "child");
    let grandchild = scene.create_child(child, "grandchild");

    scene.update_matrix_world();

    // Only the top of the chain moves; the leaves' own TRS is untouched.
    scene.get_node_mut(parent).unwrap().transform.position = Vec3::new(0.0, 0.0, 7.0);
    scene.update_matrix_world();

    let world = scene.get_node(grandchild).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(0.0, 0.0, 7.0)));
}

#[test]
fn test_noop_pass_leaves_matrices_bit_identical() {
    let mut scene = Scene::new();
    let node = scene.create_child(scene.root(), "n");
    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(0.1, 0.2, 0.3);
    scene.get_node_mut(node).unwrap().transform.rotation = Quat::from_rotation_x(0.7);

    scene.update_matrix_world();
    let before: Affine3A = *scene.get_node(node).unwrap().world_matrix();

    scene.update_matrix_world();
    let after: Affine3A = *scene.get_node(node).unwrap().world_matrix();

    assert_eq!(
        before.to_cols_array(),
        after.to_cols_array(),
        "a pass with no mutations must not rewrite cached matrices"
    );
}

#[test]
fn test_reparent_recomposes_against_new_parent() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(scene.root(), "b");
    let child = scene.create_child(a, "child");

    scene.get_node_mut(a).unwrap().transform.position = Vec3::new(10.0, 0.0, 0.0);
    scene.get_node_mut(b).unwrap().transform.position = Vec3::new(0.0, 10.0, 0.0);
    scene.update_matrix_world();

    scene.attach(child, b);
    scene.update_matrix_world();

    let world = scene.get_node(child).unwrap().world_matrix().translation;
    assert!(approx_vec3(world.into(), Vec3::new(0.0, 10.0, 0.0)));
}
