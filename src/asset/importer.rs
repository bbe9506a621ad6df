//! Importer: parsed model records to runtime animation data.
//!
//! Validation policy: structural defects that would corrupt runtime
//! invariants (dangling indices, non-monotonic keyframe times, mismatched
//! sample counts, ambiguous or forward joint parents) reject the record
//! with an error. Missing optional data (no inverse bind matrices, no
//! joints, an empty channel) degrades instead: the record is skipped with a
//! warning and the affected mesh renders rigidly or the bone holds its bind
//! pose.

use glam::{Affine3A, Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::animation::clip::{AnimationClip, BoneTrack};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::asset::document::{
    ChannelInterpolation, ChannelProperty, ModelChannel, ModelDocument,
};
use crate::errors::{Result, TalonError};
use crate::scene::skeleton::{Bone, Skeleton};

/// Builds a [`Skeleton`] from a skin record.
///
/// Returns `Ok(None)` when the skin carries no joints or no inverse bind
/// matrices; the caller should fall back to rigid rendering.
pub fn import_skeleton(doc: &ModelDocument, skin_index: usize) -> Result<Option<Skeleton>> {
    let skin = doc
        .skins
        .get(skin_index)
        .ok_or_else(|| TalonError::AssetIndexOutOfBounds {
            context: "skin".to_string(),
            index: skin_index,
        })?;

    let name = skin
        .name
        .clone()
        .unwrap_or_else(|| format!("Skin_{skin_index}"));

    if skin.joints.is_empty() {
        log::warn!("Skin '{name}' has no joints, skipping skeleton");
        return Ok(None);
    }

    let Some(ibm) = &skin.inverse_bind_matrices else {
        log::warn!("Skin '{name}' has no inverse bind matrices, skipping skeleton");
        return Ok(None);
    };

    if ibm.len() != skin.joints.len() * 16 {
        return Err(TalonError::InverseBindMatrixCount {
            expected: skin.joints.len() * 16,
            actual: ibm.len(),
        });
    }

    // Joint node index -> position in the skin's joint order.
    let mut joint_slot: FxHashMap<usize, usize> = FxHashMap::default();
    for (slot, &node_index) in skin.joints.iter().enumerate() {
        if node_index >= doc.nodes.len() {
            return Err(TalonError::AssetIndexOutOfBounds {
                context: "joint node".to_string(),
                index: node_index,
            });
        }
        joint_slot.insert(node_index, slot);
    }

    // Resolve each joint's parent from the node records' child lists,
    // considering only parents that are themselves joints of this skin. A
    // joint claimed as child by two joints has no well-defined hierarchy.
    let mut parent_slot: Vec<Option<usize>> = vec![None; skin.joints.len()];
    for (candidate_slot, &candidate_node) in skin.joints.iter().enumerate() {
        for &child_node in &doc.nodes[candidate_node].children {
            let Some(&child_slot) = joint_slot.get(&child_node) else {
                continue;
            };
            if let Some(first_slot) = parent_slot[child_slot] {
                return Err(TalonError::AmbiguousJointParent {
                    joint: doc.node_name(child_node),
                    first: doc.node_name(skin.joints[first_slot]),
                    second: doc.node_name(candidate_node),
                });
            }
            parent_slot[child_slot] = Some(candidate_slot);
        }
    }

    let mut bones = Vec::with_capacity(skin.joints.len());
    for (slot, &node_index) in skin.joints.iter().enumerate() {
        let node = &doc.nodes[node_index];

        let bind_position = node.translation.map_or(Vec3::ZERO, Vec3::from);
        let bind_rotation = node
            .rotation
            .map_or(Quat::IDENTITY, |q| unit_or_identity(Quat::from_array(q)));
        let bind_scale = node.scale.map_or(Vec3::ONE, Vec3::from);

        let matrix = Mat4::from_cols_slice(&ibm[slot * 16..(slot + 1) * 16]);

        bones.push(Bone::new(
            &doc.node_name(node_index),
            parent_slot[slot],
            bind_position,
            bind_rotation,
            bind_scale,
            Affine3A::from_mat4(matrix),
        ));
    }

    Skeleton::new(&name, bones).map(Some)
}

/// Builds an [`AnimationClip`] from one animation record.
///
/// Channels targeting the same node are grouped into one bone track with
/// independent per-property curves. Empty channels are skipped with a
/// warning; structural defects reject the whole animation.
pub fn import_animation(doc: &ModelDocument, animation_index: usize) -> Result<AnimationClip> {
    let animation =
        doc.animations
            .get(animation_index)
            .ok_or_else(|| TalonError::AssetIndexOutOfBounds {
                context: "animation".to_string(),
                index: animation_index,
            })?;

    let name = animation
        .name
        .clone()
        .unwrap_or_else(|| format!("anim_{animation_index}"));

    let mut tracks: Vec<BoneTrack> = Vec::new();
    let mut track_of_node: FxHashMap<usize, usize> = FxHashMap::default();

    for channel in &animation.channels {
        if channel.target_node >= doc.nodes.len() {
            return Err(TalonError::AssetIndexOutOfBounds {
                context: "animation target node".to_string(),
                index: channel.target_node,
            });
        }

        let node_name = doc.node_name(channel.target_node);

        if channel.times.is_empty() {
            log::warn!(
                "Animation '{name}': empty {} channel for '{node_name}', skipped",
                channel.property.label()
            );
            continue;
        }

        validate_channel(channel, &node_name)?;

        let track_index = *track_of_node.entry(channel.target_node).or_insert_with(|| {
            tracks.push(BoneTrack::new(&node_name));
            tracks.len() - 1
        });
        let track = &mut tracks[track_index];

        let mode = match channel.interpolation {
            ChannelInterpolation::Linear => InterpolationMode::Linear,
            ChannelInterpolation::Step => InterpolationMode::Step,
        };

        match channel.property {
            ChannelProperty::Translation => {
                if track.translation.is_some() {
                    log::warn!(
                        "Animation '{name}': duplicate translation channel for '{node_name}', \
                         keeping the first"
                    );
                    continue;
                }
                track.translation = Some(vec3_track(channel, mode));
            }
            ChannelProperty::Scale => {
                if track.scale.is_some() {
                    log::warn!(
                        "Animation '{name}': duplicate scale channel for '{node_name}', \
                         keeping the first"
                    );
                    continue;
                }
                track.scale = Some(vec3_track(channel, mode));
            }
            ChannelProperty::Rotation => {
                if track.rotation.is_some() {
                    log::warn!(
                        "Animation '{name}': duplicate rotation channel for '{node_name}', \
                         keeping the first"
                    );
                    continue;
                }
                track.rotation = Some(quat_track(channel, mode));
            }
        }
    }

    Ok(AnimationClip::new(&name, tracks))
}

/// Imports every animation in the document.
pub fn import_animations(doc: &ModelDocument) -> Result<Vec<AnimationClip>> {
    (0..doc.animations.len())
        .map(|i| import_animation(doc, i))
        .collect()
}

fn validate_channel(channel: &ModelChannel, node_name: &str) -> Result<()> {
    // Non-decreasing, not strictly increasing: duplicate timestamps are the
    // standard encoding for a hard discontinuity and the sampler treats the
    // zero span as a step.
    for i in 1..channel.times.len() {
        if channel.times[i] < channel.times[i - 1] {
            return Err(TalonError::NonMonotonicKeyframes {
                node: node_name.to_string(),
                property: channel.property.label(),
                index: i,
            });
        }
    }

    let stride = channel.property.stride();
    if channel.values.len() != channel.times.len() * stride {
        return Err(TalonError::ChannelSampleMismatch {
            node: node_name.to_string(),
            property: channel.property.label(),
            times: channel.times.len(),
            values: channel.values.len(),
            expected: channel.times.len() * stride,
        });
    }
    Ok(())
}

fn vec3_track(channel: &ModelChannel, mode: InterpolationMode) -> KeyframeTrack<Vec3> {
    let values = channel
        .values
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect();
    KeyframeTrack::new(channel.times.clone(), values, mode)
}

fn quat_track(channel: &ModelChannel, mode: InterpolationMode) -> KeyframeTrack<Quat> {
    // Normalize on import; interchange data is often quantized.
    let values = channel
        .values
        .chunks_exact(4)
        .map(|q| unit_or_identity(Quat::from_slice(q)))
        .collect();
    KeyframeTrack::new(channel.times.clone(), values, mode)
}

// A zero-length rotation cannot be normalized; normalizing it anyway yields
// NaNs that poison every downstream matrix.
fn unit_or_identity(q: Quat) -> Quat {
    if q.length_squared() > 1e-12 {
        q.normalize()
    } else {
        Quat::IDENTITY
    }
}
