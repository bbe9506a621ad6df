//! Talon: runtime core of a small real-time 3-D engine.
//!
//! Two subsystems make up the crate:
//!
//! - A **scene graph**: a tree of named nodes with cached hierarchical
//!   transforms and polymorphic behavior components, ticked once per frame
//!   (components first, then one world-matrix pass) and drawn through a
//!   host-supplied [`renderer::RenderBackend`].
//! - **Skeletal animation**: skeletons built from imported skin records,
//!   immutable keyframe clips, and per-playback
//!   [`animation::AnimationAction`]s that sample a pose, write it into the
//!   skeleton, and leave final joint matrices ready for skinning.
//!
//! GPU access, windowing, input devices and file parsing are collaborators
//! behind small seams ([`renderer::RenderBackend`], [`input::InputState`],
//! [`asset::ModelDocument`]), not part of this crate.

pub mod animation;
pub mod asset;
pub mod components;
pub mod errors;
pub mod input;
pub mod renderer;
pub mod resources;
pub mod scene;

pub use errors::{Result, TalonError};
pub use scene::{MeshKey, NodeKey, Scene, SkeletonKey};
