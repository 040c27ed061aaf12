use glam::{Quat, Vec3};

use crate::errors::{AnimationError, Result};

/// Values that can be blended between two keyframes.
pub trait Interpolatable: Copy {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Rotations blend spherically.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

/// Key intervals shorter than this blend with factor `0`.
const DEGENERATE_INTERVAL: f32 = 1e-6;

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last bracketing key so sequential playback finds the next
/// one in O(1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// A pair of bracketing keys and the blend factor between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBracket {
    pub tail: usize,
    pub head: usize,
    pub factor: f32,
}

/// A single time-indexed channel: key times with one value per key.
///
/// Key times are validated at construction: non-empty, finite and
/// non-decreasing. Sampling never extrapolates past either end.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Validates and builds a track. `owner` names the bone in errors.
    pub fn new(owner: &str, times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.is_empty() {
            return Err(AnimationError::malformed(owner, "track has no keys"));
        }
        if times.len() != values.len() {
            return Err(AnimationError::malformed(
                owner,
                format!(
                    "{} key times but {} key values",
                    times.len(),
                    values.len()
                ),
            ));
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
            return Err(AnimationError::malformed(
                owner,
                format!("non-finite key time {bad}"),
            ));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(AnimationError::malformed(
                owner,
                format!(
                    "key times decrease at key {}: {} -> {}",
                    i + 1,
                    times[i],
                    times[i + 1]
                ),
            ));
        }

        Ok(Self { times, values })
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; construction rejects empty tracks.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn first_value(&self) -> T {
        self.values[0]
    }

    #[inline]
    #[must_use]
    pub fn last_value(&self) -> T {
        self.values[self.values.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn last_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Finds the keys around `time` by binary search.
    ///
    /// Returns `tail == head` with factor `0` at or beyond either end.
    #[must_use]
    pub fn bracket(&self, time: f32) -> KeyBracket {
        if let Some(edge) = self.edge_bracket(time) {
            return edge;
        }
        // partition_point finds the first key strictly after `time`
        let next_idx = self.times.partition_point(|&t| t <= time);
        self.bracket_at(next_idx.saturating_sub(1), time)
    }

    /// Samples the track at `time`, holding the first/last value outside the keyed range.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        self.blend(self.bracket(time))
    }

    /// Same result as [`sample`](Self::sample), but starts the key search
    /// from the cursor and updates it.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        if let Some(edge) = self.edge_bracket(time) {
            cursor.last_index = edge.tail;
            return self.blend(edge);
        }

        let len = self.times.len();
        let start = cursor.last_index.min(len - 1);

        // `time` is strictly inside (times[0], times[len - 1]) here, so the
        // tail key exists and is never the last key.
        let contains = |idx: usize| self.times[idx] <= time && time < self.times[idx + 1];

        let found = if self.times[start] <= time {
            (start..(start + MAX_SCAN_OFFSET + 1).min(len - 1)).find(|&idx| contains(idx))
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&idx| contains(idx))
        };

        let tail = found.unwrap_or_else(|| {
            // Large jump (scrub or loop restart): fall back to binary search
            self.times.partition_point(|&t| t <= time).saturating_sub(1)
        });

        cursor.last_index = tail;
        self.blend(self.bracket_at(tail, time))
    }

    fn edge_bracket(&self, time: f32) -> Option<KeyBracket> {
        let last = self.times.len() - 1;
        if time <= 0.0 || time <= self.times[0] {
            Some(KeyBracket {
                tail: 0,
                head: 0,
                factor: 0.0,
            })
        } else if time >= self.times[last] {
            Some(KeyBracket {
                tail: last,
                head: last,
                factor: 0.0,
            })
        } else {
            None
        }
    }

    fn bracket_at(&self, tail: usize, time: f32) -> KeyBracket {
        let head = (tail + 1).min(self.times.len() - 1);
        let dt = self.times[head] - self.times[tail];

        let factor = if tail == head || dt <= DEGENERATE_INTERVAL {
            0.0
        } else {
            ((time - self.times[tail]) / dt).clamp(0.0, 1.0)
        };

        KeyBracket { tail, head, factor }
    }

    fn blend(&self, bracket: KeyBracket) -> T {
        if bracket.tail == bracket.head {
            return self.values[bracket.tail];
        }
        T::interpolate_linear(
            self.values[bracket.tail],
            self.values[bracket.head],
            bracket.factor,
        )
    }
}
