//! Parsed model document.
//!
//! The neutral in-memory form a file parser hands to the importer: node,
//! skin and animation records with the same shape and index-based
//! cross-references a glTF-style interchange format uses. Producing one of
//! these is the parser's job (out of scope here); consuming it is
//! [`crate::asset::importer`]'s.

/// Which transform property an animation channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelProperty {
    Translation,
    Rotation,
    Scale,
}

impl ChannelProperty {
    /// Floats per keyframe value for this property.
    #[must_use]
    pub fn stride(self) -> usize {
        match self {
            Self::Translation | Self::Scale => 3,
            Self::Rotation => 4,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        }
    }
}

/// Source interpolation hint carried by a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelInterpolation {
    #[default]
    Linear,
    Step,
}

/// One node record: optional name, optional TRS, child indices.
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    pub name: Option<String>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub children: Vec<usize>,
}

/// One skin record: joint node indices plus flat inverse bind matrices
/// (16 column-major floats per joint, in joint order).
#[derive(Debug, Clone, Default)]
pub struct ModelSkin {
    pub name: Option<String>,
    pub joints: Vec<usize>,
    pub inverse_bind_matrices: Option<Vec<f32>>,
}

/// One animation channel: a target node/property plus parallel flat
/// keyframe arrays (`values` holds `times.len() * property.stride()`
/// floats).
#[derive(Debug, Clone)]
pub struct ModelChannel {
    pub target_node: usize,
    pub property: ChannelProperty,
    pub interpolation: ChannelInterpolation,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}

/// One animation record.
#[derive(Debug, Clone, Default)]
pub struct ModelAnimation {
    pub name: Option<String>,
    pub channels: Vec<ModelChannel>,
}

/// A complete parsed model.
#[derive(Debug, Clone, Default)]
pub struct ModelDocument {
    pub nodes: Vec<ModelNode>,
    pub skins: Vec<ModelSkin>,
    pub animations: Vec<ModelAnimation>,
}

impl ModelDocument {
    /// Display name for a node, falling back to `Node_<index>` when the
    /// source carries none.
    #[must_use]
    pub fn node_name(&self, index: usize) -> String {
        self.nodes
            .get(index)
            .and_then(|n| n.name.clone())
            .unwrap_or_else(|| format!("Node_{index}"))
    }
}
