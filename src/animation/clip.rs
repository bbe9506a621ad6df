use glam::{Quat, Vec3};
use uuid::Uuid;

use crate::animation::tracks::KeyframeTrack;

/// The animated curves for one target bone.
///
/// Each transform property carries its own independent curve; a property
/// with no curve is simply left at whatever pose the target already has
/// (in practice the bind pose), rather than being forced to a default.
#[derive(Debug, Clone)]
pub struct BoneTrack {
    /// Name of the bone (or node) this track drives. Resolution against a
    /// concrete skeleton happens at bind time, not here.
    pub bone_name: String,

    pub translation: Option<KeyframeTrack<Vec3>>,
    pub rotation: Option<KeyframeTrack<Quat>>,
    pub scale: Option<KeyframeTrack<Vec3>>,
}

impl BoneTrack {
    #[must_use]
    pub fn new(bone_name: &str) -> Self {
        Self {
            bone_name: bone_name.to_string(),
            translation: None,
            rotation: None,
            scale: None,
        }
    }

    /// Latest keyframe time across this bone's curves.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        let mut end = 0.0f32;
        if let Some(t) = &self.translation {
            end = end.max(t.end_time());
        }
        if let Some(r) = &self.rotation {
            end = end.max(r.end_time());
        }
        if let Some(s) = &self.scale {
            end = end.max(s.end_time());
        }
        end
    }

    /// Whether any curve is present.
    #[must_use]
    pub fn has_curves(&self) -> bool {
        self.translation.is_some() || self.rotation.is_some() || self.scale.is_some()
    }
}

/// An immutable animation clip: a named set of bone tracks plus the clip
/// duration.
///
/// Clips are shared data; playback state (current time, speed, loop mode)
/// lives in [`crate::animation::AnimationAction`], so one clip can drive any
/// number of skeletons at different times.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub id: Uuid,
    pub name: String,

    /// Clip length in seconds: the latest keyframe time of any curve.
    pub duration: f32,

    tracks: Vec<BoneTrack>,
}

impl AnimationClip {
    /// Builds a clip, deriving `duration` from the tracks.
    #[must_use]
    pub fn new(name: &str, tracks: Vec<BoneTrack>) -> Self {
        let duration = tracks.iter().map(BoneTrack::end_time).fold(0.0, f32::max);
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            duration,
            tracks,
        }
    }

    #[inline]
    #[must_use]
    pub fn tracks(&self) -> &[BoneTrack] {
        &self.tracks
    }

    /// Track targeting the given bone name, if any.
    #[must_use]
    pub fn track_for(&self, bone_name: &str) -> Option<&BoneTrack> {
        self.tracks.iter().find(|t| t.bone_name == bone_name)
    }
}
