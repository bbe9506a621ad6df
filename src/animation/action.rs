use std::sync::Arc;

use glam::Affine3A;

use crate::animation::clip::AnimationClip;
use crate::animation::tracks::KeyframeCursor;
use crate::scene::skeleton::Skeleton;

/// What happens when playback reaches the end of the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play through once, then hold the final pose.
    Once,
    /// Wrap back to the start.
    #[default]
    Loop,
    /// Alternate forward and backward.
    PingPong,
}

// Resolved at bind time: clip track index paired with the bone it drives.
#[derive(Debug, Clone, Copy)]
struct TrackBinding {
    track_index: usize,
    bone_index: usize,
}

// Per-binding playback memos, one cursor per property curve.
#[derive(Debug, Clone, Copy, Default)]
struct TrackCursors {
    translation: KeyframeCursor,
    rotation: KeyframeCursor,
    scale: KeyframeCursor,
}

/// Playback of one clip on one skeleton.
///
/// Owns all mutable playback state (clock, speed, loop mode, bindings) so
/// the [`AnimationClip`] itself stays shared and immutable. Workflow:
/// [`bind`](Self::bind) once against a skeleton, then per frame
/// [`update`](Self::update) the clock and [`apply_to`](Self::apply_to) the
/// sampled pose.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    /// Playback clock in seconds. Unbounded; folded into the clip's time
    /// range according to `loop_mode` at sampling time.
    pub time: f32,
    /// Clock multiplier. Negative values play in reverse.
    pub time_scale: f32,
    pub paused: bool,
    pub enabled: bool,
    pub loop_mode: LoopMode,

    bindings: Vec<TrackBinding>,
    cursors: Vec<TrackCursors>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            paused: false,
            enabled: true,
            loop_mode: LoopMode::default(),
            bindings: Vec::new(),
            cursors: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Resolves clip tracks against a skeleton by bone name.
    ///
    /// Tracks whose bone name does not exist in the skeleton are skipped;
    /// the rest of the clip still plays. Rebinding replaces any previous
    /// binding set.
    pub fn bind(&mut self, skeleton: &Skeleton) {
        self.bindings.clear();
        for (track_index, track) in self.clip.tracks().iter().enumerate() {
            if !track.has_curves() {
                continue;
            }
            if let Some(bone_index) = skeleton.bone_index(&track.bone_name) {
                self.bindings.push(TrackBinding {
                    track_index,
                    bone_index,
                });
            } else {
                log::debug!(
                    "Animation '{}': no bone named '{}' in skeleton '{}', track skipped",
                    self.clip.name,
                    track.bone_name,
                    skeleton.name
                );
            }
        }
        self.cursors = vec![TrackCursors::default(); self.bindings.len()];
    }

    /// Number of tracks resolved by the last [`Self::bind`].
    #[inline]
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Advances the playback clock. Does not touch any skeleton.
    pub fn update(&mut self, dt: f32) {
        if self.paused || !self.enabled {
            return;
        }
        self.time += dt * self.time_scale;
        if self.loop_mode == LoopMode::Once {
            self.time = self.time.clamp(0.0, self.clip.duration);
        }
    }

    /// Whether a `Once` playback has reached the end of the clip.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.loop_mode == LoopMode::Once && self.time >= self.clip.duration
    }

    /// The clock folded into the clip's `[0, duration]` range.
    #[must_use]
    pub fn sample_time(&self) -> f32 {
        let duration = self.clip.duration;
        if duration <= 0.0 {
            return 0.0;
        }
        match self.loop_mode {
            LoopMode::Once => self.time.clamp(0.0, duration),
            LoopMode::Loop => self.time.rem_euclid(duration),
            LoopMode::PingPong => {
                let t = self.time.rem_euclid(2.0 * duration);
                if t <= duration { t } else { 2.0 * duration - t }
            }
        }
    }

    /// Samples the clip at the current clock and writes the pose into the
    /// skeleton, finishing with one propagation pass.
    ///
    /// Per bound bone, each property curve is sampled independently; a
    /// property with no curve keeps the bone's bind value, so a
    /// rotation-only clip does not flatten translations or scales.
    pub fn apply_to(&mut self, skeleton: &mut Skeleton) {
        if !self.enabled {
            return;
        }

        let time = self.sample_time();

        for (binding, cursors) in self.bindings.iter().zip(self.cursors.iter_mut()) {
            let Some(track) = self.clip.tracks().get(binding.track_index) else {
                continue;
            };
            let Some(bone) = skeleton.bones().get(binding.bone_index) else {
                continue;
            };

            let mut position = bone.bind_position;
            let mut rotation = bone.bind_rotation;
            let mut scale = bone.bind_scale;

            if let Some(curve) = &track.translation {
                position = curve.sample_with_cursor(time, &mut cursors.translation);
            }
            if let Some(curve) = &track.rotation {
                rotation = curve.sample_with_cursor(time, &mut cursors.rotation);
            }
            if let Some(curve) = &track.scale {
                scale = curve.sample_with_cursor(time, &mut cursors.scale);
            }

            skeleton.set_local_transform(
                binding.bone_index,
                Affine3A::from_scale_rotation_translation(scale, rotation, position),
            );
        }

        skeleton.update_global_transforms();
    }
}
