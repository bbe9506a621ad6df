//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`TalonError`] covers the failure modes of the
//! asset-to-runtime pipeline: structural inconsistencies in imported
//! skeletons and animation clips, and out-of-range references into the
//! pre-parsed model description.
//!
//! Missing data (an absent inverse-bind accessor, an empty joint list, an
//! empty channel) is deliberately *not* an error: importers fall back to
//! rigid rendering or the bind pose and log a warning instead, so partial
//! assets still render something.
//!
//! # Usage
//!
//! Import APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, TalonError>`.

use thiserror::Error;

/// The main error type for the Talon engine core.
///
/// Every variant describes a structural problem detected at import time.
/// Evaluation-time code paths never produce errors; a frame either completes
/// or renders a degraded (unskinned/unanimated) result.
#[derive(Error, Debug)]
pub enum TalonError {
    // ========================================================================
    // Model Description Errors
    // ========================================================================
    /// An index into the model description was out of bounds.
    #[error("Asset index out of bounds: {context} (index: {index})")]
    AssetIndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    // ========================================================================
    // Skeleton Import Errors
    // ========================================================================
    /// The inverse-bind buffer did not contain 16 floats per joint.
    #[error("Inverse bind matrix buffer length mismatch: expected {expected} floats, got {actual}")]
    InverseBindMatrixCount {
        /// joints × 16
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// A joint node appeared in the child list of two different joints.
    #[error("Joint '{joint}' has ambiguous parents: both '{first}' and '{second}' claim it")]
    AmbiguousJointParent {
        /// The contested joint
        joint: String,
        /// First claiming joint
        first: String,
        /// Second claiming joint
        second: String,
    },

    /// A joint's parent appears at a later (or equal) position in the joint
    /// list, which would break single-pass propagation.
    #[error("Joint '{bone}' (index {index}) references parent '{parent}' at index {parent_index}; parents must precede children")]
    ForwardBoneReference {
        /// The offending bone
        bone: String,
        /// Its index in the joint list
        index: usize,
        /// The parent bone name
        parent: String,
        /// The parent's index in the joint list
        parent_index: usize,
    },

    // ========================================================================
    // Animation Import Errors
    // ========================================================================
    /// Keyframe times in a channel decreased between adjacent samples.
    #[error("Non-monotonic keyframe times in channel targeting '{node}' ({property}) at sample {index}")]
    NonMonotonicKeyframes {
        /// Target node name
        node: String,
        /// Target property ("translation" | "rotation" | "scale")
        property: &'static str,
        /// Index of the first out-of-order sample
        index: usize,
    },

    /// A channel's value buffer did not match its time buffer.
    #[error("Channel targeting '{node}' ({property}) has {times} keyframes but {values} value floats (expected {expected})")]
    ChannelSampleMismatch {
        /// Target node name
        node: String,
        /// Target property
        property: &'static str,
        /// Number of keyframe times
        times: usize,
        /// Number of floats in the value buffer
        values: usize,
        /// times × component count
        expected: usize,
    },
}

/// Alias for `Result<T, TalonError>`.
pub type Result<T> = std::result::Result<T, TalonError>;
