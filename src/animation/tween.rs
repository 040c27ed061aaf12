//! Curve-driven position tweens.
//!
//! [`BasicAnimationManager`] runs any number of independent start → end
//! translations, at most one per target. Targets are addressed by key and
//! resolved through a [`TweenTargets`] store on every update, so the manager
//! never holds a reference to the objects it moves.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use glam::Vec3;
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};

use crate::animation::curves::CurveKind;
use crate::settings::{TweenCompletion, TweenSettings};
use crate::transform::PositionTarget;

/// A store that can move the object behind a tween key.
pub trait TweenTargets<K> {
    /// Moves `target`. Returns `false` if the key no longer resolves.
    fn set_position(&mut self, target: K, position: Vec3) -> bool;
}

impl<K: Key, T: PositionTarget> TweenTargets<K> for SlotMap<K, T> {
    fn set_position(&mut self, target: K, position: Vec3) -> bool {
        self.get_mut(target)
            .map(|t| t.set_position(position))
            .is_some()
    }
}

impl<K, T, S> TweenTargets<K> for HashMap<K, T, S>
where
    K: Eq + Hash,
    T: PositionTarget,
    S: BuildHasher,
{
    fn set_position(&mut self, target: K, position: Vec3) -> bool {
        self.get_mut(&target)
            .map(|t| t.set_position(position))
            .is_some()
    }
}

impl<T: PositionTarget> TweenTargets<usize> for [T] {
    fn set_position(&mut self, target: usize, position: Vec3) -> bool {
        self.get_mut(target)
            .map(|t| t.set_position(position))
            .is_some()
    }
}

impl<T: PositionTarget> TweenTargets<usize> for Vec<T> {
    fn set_position(&mut self, target: usize, position: Vec3) -> bool {
        self.as_mut_slice().set_position(target, position)
    }
}

/// One in-flight translation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimDetails<K> {
    pub target: K,
    pub start: Vec3,
    pub end: Vec3,
    pub curve: CurveKind,
    total_time: f32,
    elapsed: f32,
    finished: bool,
}

impl<K: Copy> AnimDetails<K> {
    #[must_use]
    pub fn new(target: K, start: Vec3, end: Vec3, total_time: f32, curve: CurveKind) -> Self {
        Self {
            target,
            start,
            end,
            curve,
            total_time: total_time.max(0.0),
            elapsed: 0.0,
            finished: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `elapsed / total_time`; a zero-length tween is always at its end.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.total_time > 0.0 {
            self.elapsed / self.total_time
        } else {
            1.0
        }
    }

    /// Position at the current elapsed time.
    ///
    /// The blend factor is the eased value, not clamped: back and elastic
    /// curves overshoot `start`/`end`.
    #[must_use]
    pub fn current_position(&self) -> Vec3 {
        self.start.lerp(self.end, self.curve.ease(self.progress()))
    }

    /// Position at exactly `elapsed == total_time`.
    #[must_use]
    pub fn end_position(&self) -> Vec3 {
        self.start.lerp(self.end, self.curve.ease(1.0))
    }

    /// Samples the pose at the current elapsed time, then advances by `delta`.
    ///
    /// Once elapsed time passes the total the tween is marked finished; the
    /// pose for that later time is never sampled. A zero-length tween finishes
    /// on its first step. Returns `None` once finished.
    pub fn step(&mut self, delta: f32) -> Option<Vec3> {
        if self.finished {
            return None;
        }

        let position = self.current_position();
        self.elapsed += delta.max(0.0);
        // A zero-length tween has applied its end pose and is done even if `delta` is zero
        if self.elapsed > self.total_time || self.total_time <= 0.0 {
            self.finished = true;
        }
        Some(position)
    }
}

/// Runs independent per-target tweens, at most one per target.
#[derive(Debug, Clone)]
pub struct BasicAnimationManager<K> {
    animations: FxHashMap<K, AnimDetails<K>>,
    settings: TweenSettings,
}

impl<K> Default for BasicAnimationManager<K> {
    fn default() -> Self {
        Self {
            animations: FxHashMap::default(),
            settings: TweenSettings::default(),
        }
    }
}

impl<K> BasicAnimationManager<K>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    #[must_use]
    pub fn new(settings: TweenSettings) -> Self {
        Self {
            animations: FxHashMap::default(),
            settings,
        }
    }

    /// Starts a tween on `target`, replacing any tween already running on it.
    ///
    /// The replacement starts from zero elapsed time; nothing carries over
    /// from the previous request. Returns the replaced tween.
    pub fn add_animation(
        &mut self,
        target: K,
        start: Vec3,
        end: Vec3,
        duration: f32,
        curve: CurveKind,
    ) -> Option<AnimDetails<K>> {
        let replaced = self
            .animations
            .insert(target, AnimDetails::new(target, start, end, duration, curve));
        if replaced.is_some() {
            log::debug!("Tween on {target:?} replaced by a new request");
        }
        replaced
    }

    /// Advances every tween by `delta` and moves its target.
    ///
    /// Tweens that finish during this pass are removed before it returns.
    /// Tweens whose target no longer resolves are dropped. Returns the
    /// number of tweens retired.
    pub fn update<T>(&mut self, delta: f32, targets: &mut T) -> usize
    where
        T: TweenTargets<K> + ?Sized,
    {
        let completion = self.settings.completion;
        let before = self.animations.len();

        self.animations.retain(|&key, details| {
            if let Some(position) = details.step(delta)
                && !targets.set_position(key, position)
            {
                log::warn!("Tween target {key:?} not found, dropping tween");
                return false;
            }

            if details.is_finished() {
                if completion == TweenCompletion::SnapToEnd {
                    targets.set_position(key, details.end_position());
                }
                log::debug!("Tween on {key:?} finished after {}s", details.elapsed());
                return false;
            }

            true
        });

        before - self.animations.len()
    }

    /// Stops the tween on `target` where it is.
    pub fn cancel(&mut self, target: K) -> Option<AnimDetails<K>> {
        self.animations.remove(&target)
    }

    pub fn clear(&mut self) {
        self.animations.clear();
    }

    #[must_use]
    pub fn get(&self, target: K) -> Option<&AnimDetails<K>> {
        self.animations.get(&target)
    }

    #[must_use]
    pub fn contains(&self, target: K) -> bool {
        self.animations.contains_key(&target)
    }

    /// `true` while any tween is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.animations.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    #[must_use]
    pub fn settings(&self) -> &TweenSettings {
        &self.settings
    }
}
