use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::animation::bone_clip::BoneCursor;
use crate::animation::clip::AnimClip;
use crate::animation::moment::AnimMoment;
use crate::animation::timeline::Timeline;
use crate::errors::Result;
use crate::settings::AnimatorSettings;

/// Receiver of sampled poses, usually a skeletal hierarchy.
pub trait SkeletonConsumer {
    /// Sets the local pose of the named member.
    ///
    /// Returns [`AnimationError::MemberNotFound`](crate::errors::AnimationError::MemberNotFound)
    /// when the name is unknown.
    fn update_member(&mut self, name: &str, position: Vec3, rotation: Quat) -> Result<()>;

    /// Rebuilds derived data once all members of the frame are updated.
    fn finalize_mesh(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    /// No clip bound; ticks do nothing.
    Idle,
    /// A clip is bound and the timeline advances every tick.
    Playing,
}

/// What one [`Animator::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Moments applied to a skeleton member.
    pub applied: usize,
    /// Moments whose bone name had no skeleton member.
    pub missed: usize,
}

/// Plays one clip on a skeleton.
///
/// The animator owns the playback timeline. Every tick it advances the
/// timeline, samples the bound clip and pushes each bone's pose into the
/// skeleton by name, then asks the skeleton to rebuild its derived data.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    clip: Option<Arc<AnimClip>>,
    timeline: Timeline,
    settings: AnimatorSettings,

    cursors: Vec<BoneCursor>,
    moments: Vec<AnimMoment>,
}

impl Animator {
    #[must_use]
    pub fn new(settings: AnimatorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_clip(clip: Arc<AnimClip>, settings: AnimatorSettings) -> Self {
        let mut animator = Self::new(settings);
        animator.bind(clip);
        animator
    }

    #[must_use]
    pub fn state(&self) -> AnimatorState {
        if self.clip.is_some() {
            AnimatorState::Playing
        } else {
            AnimatorState::Idle
        }
    }

    /// Binds a clip and restarts playback from time zero.
    pub fn bind(&mut self, clip: Arc<AnimClip>) {
        log::debug!(
            "Animator: binding clip '{}' ({} bones, {} ticks, loops: {})",
            clip.name,
            clip.bones().len(),
            clip.duration(),
            clip.loops()
        );

        self.timeline.set_time(0.0);
        self.timeline.set_duration(clip.duration());
        self.timeline.set_loops(clip.loops());

        self.cursors.clear();
        self.cursors
            .resize(clip.bones().len(), BoneCursor::default());

        self.clip = Some(clip);
    }

    /// Releases the bound clip and returns to idle.
    pub fn unbind(&mut self) -> Option<Arc<AnimClip>> {
        self.cursors.clear();
        self.moments.clear();
        self.clip.take()
    }

    /// Advances playback by `delta` and applies the resulting pose.
    ///
    /// A no-op while idle. Bones with no matching skeleton member are
    /// logged and skipped; the remaining bones are still applied and the
    /// skeleton is still finalized.
    pub fn tick<S>(&mut self, delta: f32, skeleton: &mut S) -> TickReport
    where
        S: SkeletonConsumer + ?Sized,
    {
        let Some(clip) = self.clip.as_ref() else {
            log::trace!("Animator: tick while idle");
            return TickReport::default();
        };

        let ticks = self
            .settings
            .delta_to_ticks(delta, clip.ticks_per_second());
        self.timeline.advance(ticks);

        clip.sample_into(self.timeline.time(), &mut self.cursors, &mut self.moments);

        let mut report = TickReport::default();
        for moment in &self.moments {
            match skeleton.update_member(&moment.bone_name, moment.position, moment.rotation) {
                Ok(()) => report.applied += 1,
                Err(err) => {
                    log::warn!("Animator: clip '{}': {err}", clip.name);
                    report.missed += 1;
                }
            }
        }

        skeleton.finalize_mesh();
        report
    }

    #[inline]
    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimClip>> {
        self.clip.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current playback time in ticks.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.timeline.time()
    }

    /// Poses computed by the most recent tick.
    #[inline]
    #[must_use]
    pub fn last_moments(&self) -> &[AnimMoment] {
        &self.moments
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: AnimatorSettings) {
        self.settings = settings;
    }
}
