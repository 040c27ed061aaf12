use glam::{Quat, Vec3};

use crate::animation::moment::AnimMoment;
use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};
use crate::errors::{AnimationError, Result};

/// Search state for one bone's two tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoneCursor {
    pub position: KeyframeCursor,
    pub rotation: KeyframeCursor,
}

/// Keyframe history of a single bone during a clip.
///
/// Position and rotation are separate tracks with their own key times;
/// they may differ in key count and spacing. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneClip {
    name: String,
    positions: KeyframeTrack<Vec3>,
    rotations: KeyframeTrack<Quat>,
}

impl BoneClip {
    /// Validates both tracks and normalizes rotation keys.
    ///
    /// Fails with [`AnimationError::MalformedClip`] on empty tracks,
    /// mismatched lengths, non-finite or decreasing key times, and rotation
    /// keys that cannot be normalized.
    pub fn new(
        name: impl Into<String>,
        position_times: Vec<f32>,
        positions: Vec<Vec3>,
        rotation_times: Vec<f32>,
        rotations: Vec<Quat>,
    ) -> Result<Self> {
        let name = name.into();

        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(AnimationError::malformed(
                &name,
                format!("position key {i} is not finite"),
            ));
        }

        let rotations = rotations
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                let len = q.length();
                if len.is_finite() && len > f32::EPSILON {
                    Ok(q / len)
                } else {
                    Err(AnimationError::malformed(
                        &name,
                        format!("rotation key {i} cannot be normalized"),
                    ))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let positions = KeyframeTrack::new(&name, position_times, positions)?;
        let rotations = KeyframeTrack::new(&name, rotation_times, rotations)?;

        Ok(Self {
            name,
            positions,
            rotations,
        })
    }

    /// A bone that holds one pose for the whole clip.
    pub fn constant(name: impl Into<String>, position: Vec3, rotation: Quat) -> Result<Self> {
        Self::new(name, vec![0.0], vec![position], vec![0.0], vec![rotation])
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn position_track(&self) -> &KeyframeTrack<Vec3> {
        &self.positions
    }

    #[inline]
    #[must_use]
    pub fn rotation_track(&self) -> &KeyframeTrack<Quat> {
        &self.rotations
    }

    /// Latest key time across both tracks.
    #[must_use]
    pub fn last_key_time(&self) -> f32 {
        self.positions.last_time().max(self.rotations.last_time())
    }

    /// Samples the bone at `time`.
    ///
    /// At or before zero both tracks hold their first key. At or past the
    /// last position key the whole moment holds the last key of both tracks,
    /// even if the rotation track runs longer. In between, each track finds
    /// its own bracketing keys: position is lerped, rotation is slerped.
    #[must_use]
    pub fn sample(&self, time: f32) -> AnimMoment {
        if let Some(end) = self.end_moment(time) {
            return end;
        }
        AnimMoment::new(
            self.name.clone(),
            self.positions.sample(time),
            self.rotations.sample(time),
        )
    }

    /// Same result as [`sample`](Self::sample), using cursors for sequential playback.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut BoneCursor) -> AnimMoment {
        if let Some(end) = self.end_moment(time) {
            cursor.position.last_index = self.positions.len() - 1;
            cursor.rotation.last_index = self.rotations.len() - 1;
            return end;
        }
        AnimMoment::new(
            self.name.clone(),
            self.positions.sample_with_cursor(time, &mut cursor.position),
            self.rotations.sample_with_cursor(time, &mut cursor.rotation),
        )
    }

    fn end_moment(&self, time: f32) -> Option<AnimMoment> {
        (time > 0.0 && time >= self.positions.last_time()).then(|| {
            AnimMoment::new(
                self.name.clone(),
                self.positions.last_value(),
                self.rotations.last_value(),
            )
        })
    }
}
