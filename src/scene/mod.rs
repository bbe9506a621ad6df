//! Scene graph: nodes, transforms, components, skeletons.

pub mod component;
pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;
pub mod transform_system;

pub use component::{Component, ComponentTypeId, UpdateContext, component_type_id};
pub use node::Node;
pub use scene::Scene;
pub use skeleton::{Bone, Skeleton};
pub use transform::Transform;

slotmap::new_key_type! {
    /// Generational key of a node in a scene's arena.
    pub struct NodeKey;
    /// Generational key of a mesh in a scene's mesh pool.
    pub struct MeshKey;
    /// Generational key of a skeleton in a scene's skeleton pool.
    pub struct SkeletonKey;
}
