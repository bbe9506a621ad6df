//! Built-in behavior components.

pub mod animator;
pub mod camera;
pub mod mesh_renderer;
pub mod player;

pub use animator::Animator;
pub use camera::{Camera, ProjectionMode};
pub use mesh_renderer::MeshRenderer;
pub use player::Player;
