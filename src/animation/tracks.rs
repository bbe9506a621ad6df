//! Keyframe tracks.
//!
//! A track is a sorted list of `(time, value)` keyframes over one animated
//! property. Sampling is stateless by default (binary search per query); a
//! [`KeyframeCursor`] remembers the last keyframe interval so sequential
//! playback degenerates to a short local scan.

use crate::animation::values::Interpolatable;

/// How values between two keyframes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Blend between the surrounding keyframes (lerp / slerp by value type).
    #[default]
    Linear,
    /// Hold the earlier keyframe's value until the next keyframe time.
    Step,
}

/// Playback position memo for one track.
///
/// Stores the index of the keyframe at or before the last sampled time.
/// Purely an accelerator: a stale or default cursor never changes the
/// sampled value, only how the interval is found.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub(crate) index: usize,
}

// How far a cursor walks before giving up and binary-searching.
const MAX_SCAN_OFFSET: usize = 3;

/// A keyframe curve over values of type `T`.
///
/// Invariant: `times` is strictly increasing and `times.len() == values.len()
/// >= 1`. Enforced at import; constructors here assume it.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Builds a track from parallel time/value arrays.
    ///
    /// # Panics
    ///
    /// Panics when the arrays differ in length or are empty.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        assert_eq!(
            times.len(),
            values.len(),
            "keyframe times and values must be parallel arrays"
        );
        assert!(!times.is_empty(), "a keyframe track needs at least one keyframe");
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Time of the last keyframe.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        *self.times.last().unwrap_or(&0.0)
    }

    /// Samples the track at `time`, clamping outside the keyframe range.
    ///
    /// Queries before the first keyframe return the first value, queries at
    /// or after the last return the last. A query that lands exactly on a
    /// keyframe returns that keyframe's value with no blending.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // Index of the first keyframe strictly after `time`.
        let upper = self.times.partition_point(|&t| t <= time);
        self.sample_interval(time, upper)
    }

    /// Cursor-accelerated sampling for monotonic playback.
    ///
    /// Starts from the cursor's remembered interval and scans at most
    /// [`MAX_SCAN_OFFSET`] keyframes forward before falling back to binary
    /// search. Returns the same value [`Self::sample`] would.
    #[must_use]
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let n = self.times.len();
        let start = cursor.index.min(n.saturating_sub(1));

        let upper = if self.times[start] <= time {
            // Scan forward from the memo.
            let mut i = start + 1;
            let scan_end = (start + 1 + MAX_SCAN_OFFSET).min(n);
            while i < scan_end && self.times[i] <= time {
                i += 1;
            }
            if i < scan_end || i == n || self.times[i] > time {
                i
            } else {
                self.times.partition_point(|&t| t <= time)
            }
        } else {
            // Time moved backwards past the memo (seek, loop wrap).
            self.times.partition_point(|&t| t <= time)
        };

        cursor.index = upper.saturating_sub(1);
        self.sample_interval(time, upper)
    }

    // `upper` is the index of the first keyframe strictly after `time`.
    fn sample_interval(&self, time: f32, upper: usize) -> T {
        if upper == 0 {
            return self.values[0];
        }
        if upper >= self.times.len() {
            return self.values[self.times.len() - 1];
        }

        let i0 = upper - 1;
        let t0 = self.times[i0];

        match self.interpolation {
            InterpolationMode::Step => self.values[i0],
            InterpolationMode::Linear => {
                let t1 = self.times[upper];
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return self.values[i0];
                }
                let alpha = (time - t0) / span;
                self.values[i0].interpolate(self.values[upper], alpha)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> KeyframeTrack<f32> {
        KeyframeTrack::new(
            vec![0.0, 1.0, 2.0, 4.0],
            vec![0.0, 10.0, 20.0, 40.0],
            InterpolationMode::Linear,
        )
    }

    #[test]
    fn test_sample_clamps_at_both_ends() {
        let t = track();
        assert!((t.sample(-1.0) - 0.0).abs() < 1e-6);
        assert!((t.sample(9.0) - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_exact_keyframe_hit() {
        let t = track();
        assert!((t.sample(2.0) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_interpolates_between_keyframes() {
        let t = track();
        assert!((t.sample(0.5) - 5.0).abs() < 1e-6);
        assert!((t.sample(3.0) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_keyframe_holds_value() {
        let t = KeyframeTrack::new(vec![0.5], vec![7.0], InterpolationMode::Linear);
        assert!((t.sample(0.0) - 7.0).abs() < 1e-6);
        assert!((t.sample(0.5) - 7.0).abs() < 1e-6);
        assert!((t.sample(2.0) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_mode_holds_until_next_keyframe() {
        let t = KeyframeTrack::new(
            vec![0.0, 1.0, 2.0],
            vec![0.0, 10.0, 20.0],
            InterpolationMode::Step,
        );
        assert!((t.sample(0.99) - 0.0).abs() < 1e-6);
        assert!((t.sample(1.0) - 10.0).abs() < 1e-6);
        assert!((t.sample(1.5) - 10.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "parallel arrays")]
    fn test_mismatched_array_lengths_are_rejected() {
        let _ = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0f32], InterpolationMode::Linear);
    }

    #[test]
    #[should_panic(expected = "at least one keyframe")]
    fn test_empty_track_is_rejected() {
        let _ = KeyframeTrack::<f32>::new(Vec::new(), Vec::new(), InterpolationMode::Linear);
    }

    #[test]
    fn test_cursor_matches_stateless_sample() {
        let t = track();
        let mut cursor = KeyframeCursor::default();

        // Sequential playback, then a backwards seek.
        let queries = [0.0, 0.3, 0.9, 1.1, 2.5, 3.9, 4.0, 0.2, 1.7];
        for &q in &queries {
            let expected = t.sample(q);
            let got = t.sample_with_cursor(q, &mut cursor);
            assert!(
                (expected - got).abs() < 1e-6,
                "cursor sample diverged at t={q}: {got} vs {expected}"
            );
        }
    }
}
