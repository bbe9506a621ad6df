use std::any::Any;

use glam::{Affine3A, Mat4};

use crate::scene::component::{Component, ComponentTypeId, component_type_id};

/// Projection style for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Camera component.
///
/// Holds projection parameters and a cached projection matrix. The view
/// matrix is not cached: it is derived on demand from the owning node's
/// world matrix, so it is always consistent with whatever hierarchy pass
/// last ran.
#[derive(Debug, Clone)]
pub struct Camera {
    pub mode: ProjectionMode,

    /// Vertical field of view in radians (perspective only).
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Half-height of the view volume (orthographic only).
    pub ortho_size: f32,

    projection_matrix: Mat4,
}

impl Camera {
    /// Perspective camera with the given vertical field of view (radians).
    #[must_use]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            mode: ProjectionMode::Perspective,
            fov_y,
            aspect,
            near,
            far,
            ortho_size: 1.0,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Orthographic camera with the given half-height.
    #[must_use]
    pub fn orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            mode: ProjectionMode::Orthographic,
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect,
            near,
            far,
            ortho_size,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recomputes the cached projection matrix. Call after mutating any
    /// projection parameter.
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_h = self.ortho_size;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        };
    }

    /// Convenience for window resizes.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// View matrix for a camera placed at `world`: the inverse of the
    /// owning node's world matrix.
    #[must_use]
    pub fn view_matrix(&self, world: &Affine3A) -> Mat4 {
        Mat4::from(world.inverse())
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self, world: &Affine3A) -> Mat4 {
        self.projection_matrix * self.view_matrix(world)
    }
}

impl Component for Camera {
    fn type_tag(&self) -> ComponentTypeId {
        component_type_id::<Self>()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
