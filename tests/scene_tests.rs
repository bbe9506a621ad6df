//! Scene graph and component-model tests.
//!
//! Covers tree surgery (create, reparent, remove), key invalidation,
//! typed component lookup, traversal order during update, and draw
//! submission through a recording backend.

use std::any::Any;
use std::sync::Arc;

use glam::{Affine3A, Mat4, Quat, Vec3};
use parking_lot::Mutex;
use talon::Scene;
use talon::animation::{AnimationAction, AnimationClip, BoneTrack, InterpolationMode, KeyframeTrack};
use talon::components::{Animator, Camera, MeshRenderer, Player};
use talon::input::InputState;
use talon::renderer::{GeometryHandle, RenderBackend};
use talon::resources::Mesh;
use talon::scene::{
    Bone, Component, ComponentTypeId, NodeKey, Skeleton, UpdateContext, component_type_id,
};

// ============================================================================
// Helpers
// ============================================================================

// Appends its node's name to a shared log on every update.
struct Recorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl Component for Recorder {
    fn type_tag(&self) -> ComponentTypeId {
        component_type_id::<Recorder>()
    }
    fn update(&mut self, scene: &mut Scene, node: NodeKey, _ctx: &UpdateContext<'_>) {
        let name = scene.get_node(node).unwrap().name.clone();
        self.log.lock().push(name);
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<(GeometryHandle, Mat4, usize)>,
}

impl RenderBackend for RecordingBackend {
    fn draw_mesh(&mut self, geometry: GeometryHandle, world: Mat4, joint_matrices: &[Mat4]) {
        self.calls.push((geometry, world, joint_matrices.len()));
    }
}

// ============================================================================
// Tree surgery
// ============================================================================

#[test]
fn test_create_child_links_both_directions() {
    let mut scene = Scene::new();
    let child = scene.create_child(scene.root(), "child");

    assert_eq!(scene.get_node(child).unwrap().parent(), Some(scene.root()));
    assert_eq!(scene.get_node(scene.root()).unwrap().children(), &[child]);
}

#[test]
fn test_remove_node_drops_whole_subtree() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(a, "b");
    let c = scene.create_child(b, "c");

    scene.remove_node(a);

    assert!(scene.get_node(a).is_none());
    assert!(scene.get_node(b).is_none());
    assert!(scene.get_node(c).is_none());
    assert!(
        scene.get_node(scene.root()).unwrap().children().is_empty(),
        "root must no longer list the removed child"
    );
}

#[test]
fn test_root_cannot_be_removed_or_reparented() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");

    scene.remove_node(scene.root());
    assert!(scene.get_node(scene.root()).is_some());

    scene.attach(scene.root(), a);
    assert!(scene.get_node(scene.root()).unwrap().parent().is_none());
}

#[test]
fn test_attach_detaches_from_old_parent() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(scene.root(), "b");
    let child = scene.create_child(a, "child");

    scene.attach(child, b);

    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert_eq!(scene.get_node(b).unwrap().children(), &[child]);
    assert_eq!(scene.get_node(child).unwrap().parent(), Some(b));
}

#[test]
fn test_attach_under_own_descendant_is_refused() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(a, "b");
    let c = scene.create_child(b, "c");

    // Linking a under its own grandchild would make the tree cyclic.
    scene.attach(a, c);

    assert_eq!(scene.get_node(a).unwrap().parent(), Some(scene.root()));
    assert!(scene.get_node(c).unwrap().children().is_empty());

    // Traversal still terminates.
    scene.update(1.0 / 60.0, &InputState::default());
    scene.update_matrix_world();
}

#[test]
fn test_find_node_by_name() {
    let mut scene = Scene::new();
    let a = scene.create_child(scene.root(), "a");
    let target = scene.create_child(a, "target");
    scene.create_child(scene.root(), "b");

    assert_eq!(scene.find_node("target"), Some(target));
    assert_eq!(scene.find_node("missing"), None);
}

// ============================================================================
// Components
// ============================================================================

#[test]
fn test_typed_component_lookup() {
    let mut scene = Scene::new();
    let node = scene.create_child(scene.root(), "cam");

    let n = scene.get_node_mut(node).unwrap();
    n.add_component(Camera::perspective(1.0, 16.0 / 9.0, 0.1, 100.0));
    n.add_component(Player::default());

    let n = scene.get_node(node).unwrap();
    assert_eq!(n.component_count(), 2);
    assert!(n.get_component::<Camera>().is_some());
    assert!(n.get_component::<Player>().is_some());
    assert!(n.get_component::<MeshRenderer>().is_none());

    // Mutable lookup reaches the same component.
    let n = scene.get_node_mut(node).unwrap();
    let cam = n.get_component_mut::<Camera>().unwrap();
    cam.set_aspect(2.0);
    assert!((n.get_component::<Camera>().unwrap().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn test_update_order_is_depth_first_preorder() {
    let mut scene = Scene::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    let a = scene.create_child(scene.root(), "a");
    let b = scene.create_child(scene.root(), "b");
    let a1 = scene.create_child(a, "a1");

    for key in [a, a1, b] {
        scene
            .get_node_mut(key)
            .unwrap()
            .add_component(Recorder { log: Arc::clone(&log) });
    }

    scene.update(1.0 / 60.0, &InputState::default());

    assert_eq!(*log.lock(), vec!["a", "a1", "b"]);
}

#[test]
fn test_player_moves_and_turns_its_node() {
    let mut scene = Scene::new();
    let node = scene.create_child(scene.root(), "player");
    scene
        .get_node_mut(node)
        .unwrap()
        .add_component(Player::new(2.0, 1.0));

    // Forward input with no look delta: -Z in the node's frame.
    let input = InputState {
        move_axis: Vec3::new(0.0, 0.0, 1.0),
        ..Default::default()
    };
    scene.update(0.5, &input);

    let pos = scene.get_node(node).unwrap().transform.position;
    assert!((pos.z + 1.0).abs() < 1e-5, "expected 1 unit along -Z, got {pos:?}");
}

// ============================================================================
// Draw traversal
// ============================================================================

#[test]
fn test_draw_submits_world_matrix_and_no_joints_for_rigid_mesh() {
    let mut scene = Scene::new();
    let geometry = GeometryHandle(42);
    let mesh = scene.add_mesh(Mesh::new("cube", geometry));

    let node = scene.create_child(scene.root(), "cube");
    scene.get_node_mut(node).unwrap().transform.position = Vec3::new(0.0, 3.0, 0.0);
    scene.get_node_mut(node).unwrap().add_component(MeshRenderer::new(mesh));

    scene.update(0.0, &InputState::default());

    let mut backend = RecordingBackend::default();
    scene.draw(&mut backend);

    assert_eq!(backend.calls.len(), 1);
    let (g, world, joint_count) = backend.calls[0];
    assert_eq!(g, geometry);
    assert_eq!(joint_count, 0);
    let pos = world.transform_point3(Vec3::ZERO);
    assert!((pos.y - 3.0).abs() < 1e-5);
}

#[test]
fn test_animator_drives_skinned_mesh_through_a_frame() {
    let mut scene = Scene::new();

    let bones = vec![
        Bone::new("root", None, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, Affine3A::IDENTITY),
        Bone::new(
            "tip",
            Some(0),
            Vec3::new(1.0, 0.0, 0.0),
            Quat::IDENTITY,
            Vec3::ONE,
            Affine3A::from_translation(Vec3::new(-1.0, 0.0, 0.0)),
        ),
    ];
    let skeleton = scene.add_skeleton(Skeleton::new("arm", bones).unwrap());

    let geometry = GeometryHandle(7);
    let mesh = scene.add_mesh(Mesh::new("arm_mesh", geometry).with_skin(skeleton));

    // Root bone slides 1 unit along +Y over one second.
    let mut track = BoneTrack::new("root");
    track.translation = Some(KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::Y],
        InterpolationMode::Linear,
    ));
    let clip = Arc::new(AnimationClip::new("slide", vec![track]));

    let node = scene.create_child(scene.root(), "arm");
    let animator = Animator::new(AnimationAction::new(clip), skeleton, &scene);
    let n = scene.get_node_mut(node).unwrap();
    n.add_component(animator);
    n.add_component(MeshRenderer::new(mesh));

    scene.update(0.5, &InputState::default());

    let mut backend = RecordingBackend::default();
    scene.draw(&mut backend);

    assert_eq!(backend.calls.len(), 1);
    let (_, _, joint_count) = backend.calls[0];
    assert_eq!(joint_count, 2, "skinned draw must submit every joint matrix");

    // After half the clip the whole skeleton sits 0.5 up; a bind-space
    // point at the tip follows.
    let skinned = scene.skeletons[skeleton].joint_matrices()[1]
        .transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!((skinned - Vec3::new(1.0, 0.5, 0.0)).length() < 1e-4, "got {skinned:?}");
}

#[test]
fn test_stale_mesh_key_draws_nothing() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(Mesh::new("gone", GeometryHandle(1)));
    let node = scene.create_child(scene.root(), "n");
    scene.get_node_mut(node).unwrap().add_component(MeshRenderer::new(mesh));

    scene.remove_mesh(mesh);

    let mut backend = RecordingBackend::default();
    scene.draw(&mut backend);
    assert!(backend.calls.is_empty());
}
