use crate::renderer::GeometryHandle;
use crate::scene::SkeletonKey;

/// Links a mesh to the skeleton that deforms it.
#[derive(Debug, Clone, Copy)]
pub struct SkinBinding {
    pub skeleton: SkeletonKey,
}

/// A renderable mesh resource.
///
/// Geometry lives behind an opaque backend handle; the scene only tracks
/// the handle plus an optional skin binding. Meshes are pool resources
/// referenced by key from any number of nodes.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub geometry: GeometryHandle,
    /// `None` renders rigidly.
    pub skin: Option<SkinBinding>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str, geometry: GeometryHandle) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            skin: None,
        }
    }

    #[must_use]
    pub fn with_skin(mut self, skeleton: SkeletonKey) -> Self {
        self.skin = Some(SkinBinding { skeleton });
        self
    }
}
