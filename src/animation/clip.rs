use rustc_hash::FxHashMap;

use crate::animation::bone_clip::{BoneClip, BoneCursor};
use crate::animation::moment::AnimMoment;
use crate::errors::{AnimationError, Result};

/// A timed collection of per-bone keyframe tracks.
///
/// Bone names are unique within a clip. Adding a bone whose name is already
/// present replaces the existing bone clip in place, keeping its position
/// in the sampling order.
#[derive(Debug, Clone)]
pub struct AnimClip {
    pub name: String,
    bone_clips: Vec<BoneClip>,
    name_to_index: FxHashMap<String, usize>,

    /// Duration in ticks.
    duration: f32,
    ticks_per_second: f32,
    loops: bool,
}

impl AnimClip {
    pub fn new(
        name: impl Into<String>,
        bone_clips: Vec<BoneClip>,
        duration: f32,
        ticks_per_second: f32,
        loops: bool,
    ) -> Result<Self> {
        if !duration.is_finite()
            || duration < 0.0
            || !ticks_per_second.is_finite()
            || ticks_per_second < 0.0
        {
            return Err(AnimationError::InvalidClipTiming {
                duration,
                ticks_per_second,
            });
        }

        let mut clip = Self {
            name: name.into(),
            bone_clips: Vec::with_capacity(bone_clips.len()),
            name_to_index: FxHashMap::default(),
            duration,
            ticks_per_second,
            loops,
        };
        for bone in bone_clips {
            clip.add_bone(bone);
        }
        Ok(clip)
    }

    /// Builds a clip whose duration is the latest key time of any bone.
    pub fn from_bone_clips(
        name: impl Into<String>,
        bone_clips: Vec<BoneClip>,
        ticks_per_second: f32,
        loops: bool,
    ) -> Result<Self> {
        let duration = bone_clips
            .iter()
            .map(BoneClip::last_key_time)
            .fold(0.0_f32, f32::max);
        Self::new(name, bone_clips, duration, ticks_per_second, loops)
    }

    /// Adds a bone, replacing any bone with the same name.
    ///
    /// Returns the replaced bone clip, if there was one.
    pub fn add_bone(&mut self, bone: BoneClip) -> Option<BoneClip> {
        if let Some(&index) = self.name_to_index.get(bone.name()) {
            log::debug!("Clip '{}': replacing bone '{}'", self.name, bone.name());
            return Some(std::mem::replace(&mut self.bone_clips[index], bone));
        }

        self.name_to_index
            .insert(bone.name().to_string(), self.bone_clips.len());
        self.bone_clips.push(bone);
        None
    }

    #[must_use]
    pub fn bone(&self, name: &str) -> Option<&BoneClip> {
        self.name_to_index.get(name).map(|&i| &self.bone_clips[i])
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[BoneClip] {
        &self.bone_clips
    }

    /// Samples every bone at `time`, in insertion order.
    #[must_use]
    pub fn sample_all(&self, time: f32) -> Vec<AnimMoment> {
        self.bone_clips.iter().map(|bone| bone.sample(time)).collect()
    }

    /// Samples every bone into `out` (cleared first), advancing one cursor per bone.
    ///
    /// `cursors` is resized to the bone count when it does not match.
    pub fn sample_into(
        &self,
        time: f32,
        cursors: &mut Vec<BoneCursor>,
        out: &mut Vec<AnimMoment>,
    ) {
        if cursors.len() != self.bone_clips.len() {
            cursors.clear();
            cursors.resize(self.bone_clips.len(), BoneCursor::default());
        }

        out.clear();
        out.extend(
            self.bone_clips
                .iter()
                .zip(cursors.iter_mut())
                .map(|(bone, cursor)| bone.sample_with_cursor(time, cursor)),
        );
    }

    /// Duration in ticks.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f32) -> Result<()> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimationError::InvalidClipTiming {
                duration,
                ticks_per_second: self.ticks_per_second,
            });
        }
        self.duration = duration;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    #[inline]
    #[must_use]
    pub fn loops(&self) -> bool {
        self.loops
    }

    pub fn set_loops(&mut self, loops: bool) {
        self.loops = loops;
    }
}
