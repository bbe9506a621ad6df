//! Model import: parsed-document types and the importer that turns them
//! into runtime skeletons and clips.

pub mod document;
pub mod importer;

pub use document::{
    ChannelInterpolation, ChannelProperty, ModelAnimation, ModelChannel, ModelDocument,
    ModelNode, ModelSkin,
};
pub use importer::{import_animation, import_animations, import_skeleton};
