use std::any::Any;

use crate::renderer::RenderBackend;
use crate::scene::component::{Component, ComponentTypeId, component_type_id};
use crate::scene::{MeshKey, NodeKey, Scene};

/// Draws a mesh at the owning node's world transform.
///
/// References the mesh by pool key; a stale key just draws nothing. Skinned
/// meshes submit their skeleton's joint matrices, rigid ones an empty
/// slice, and a mesh whose skin binding no longer resolves falls back to
/// rigid rendering.
#[derive(Debug, Clone, Copy)]
pub struct MeshRenderer {
    pub mesh: MeshKey,
}

impl MeshRenderer {
    #[must_use]
    pub fn new(mesh: MeshKey) -> Self {
        Self { mesh }
    }
}

impl Component for MeshRenderer {
    fn type_tag(&self) -> ComponentTypeId {
        component_type_id::<Self>()
    }

    fn draw(&self, scene: &Scene, node: NodeKey, backend: &mut dyn RenderBackend) {
        let Some(node) = scene.get_node(node) else {
            return;
        };
        let Some(mesh) = scene.meshes.get(self.mesh) else {
            return;
        };

        let joint_matrices = mesh
            .skin
            .and_then(|skin| scene.skeletons.get(skin.skeleton))
            .map_or(&[][..], |skeleton| skeleton.joint_matrices());

        backend.draw_mesh(
            mesh.geometry,
            node.transform.world_matrix_as_mat4(),
            joint_matrices,
        );
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
