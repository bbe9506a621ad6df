//! Skeletal animation: keyframe tracks, clips, and playback.

pub mod action;
pub mod clip;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, LoopMode};
pub use clip::{AnimationClip, BoneTrack};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
