//! Render backend seam.
//!
//! The scene graph never talks to a GPU directly; draw traversal hands each
//! visible mesh to a [`RenderBackend`] supplied by the host. Geometry is an
//! opaque handle minted by whatever owns the actual vertex data.

use glam::Mat4;

/// Opaque handle to uploaded geometry, minted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u64);

/// Sink for draw submissions during scene traversal.
pub trait RenderBackend {
    /// Submits one mesh instance.
    ///
    /// `joint_matrices` is empty for rigid meshes; for skinned meshes it is
    /// the skeleton's final matrices in joint order.
    fn draw_mesh(&mut self, geometry: GeometryHandle, world: Mat4, joint_matrices: &[Mat4]);
}
