//! Animation Settings
//!
//! Plain configuration structs handed to the animation drivers at
//! construction time. Every struct implements [`Default`], so callers only
//! spell out what they want to change:
//!
//! ```rust,ignore
//! use contraption::settings::{AnimatorSettings, DeltaUnit};
//!
//! let settings = AnimatorSettings {
//!     delta_unit: DeltaUnit::Ticks,
//!     ..Default::default()
//! };
//! ```

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Unit of the `delta` passed to [`Animator::tick`](crate::animation::Animator::tick).
///
/// Clip durations and key times are stored in ticks. This decides where the
/// conversion from wall-clock seconds to ticks happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaUnit {
    /// The driver passes seconds. The animator multiplies by the bound clip's
    /// `ticks_per_second` (non-positive rates count as one tick per second).
    #[default]
    Seconds,
    /// The driver passes ticks and has already applied any rate conversion.
    Ticks,
}

/// Configuration for a single [`Animator`](crate::animation::Animator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorSettings {
    /// How the per-frame delta is interpreted.
    pub delta_unit: DeltaUnit,
    /// Playback speed multiplier. Negative values are treated as zero.
    pub time_scale: f32,
}

impl Default for AnimatorSettings {
    #[inline]
    fn default() -> Self {
        Self {
            delta_unit: DeltaUnit::Seconds,
            time_scale: 1.0,
        }
    }
}

impl AnimatorSettings {
    /// Converts a driver delta into timeline ticks for a clip with the given rate.
    #[inline]
    #[must_use]
    pub fn delta_to_ticks(&self, delta: f32, ticks_per_second: f32) -> f32 {
        let scaled = delta * self.time_scale.max(0.0);
        match self.delta_unit {
            DeltaUnit::Ticks => scaled,
            DeltaUnit::Seconds if ticks_per_second > 0.0 => scaled * ticks_per_second,
            DeltaUnit::Seconds => scaled,
        }
    }
}

// ---------------------------------------------------------------------------
// Tweens
// ---------------------------------------------------------------------------

/// What a tween applies on the update where it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenCompletion {
    /// The target keeps the pose sampled on the previous update. The end pose
    /// at exactly `elapsed == total` is never applied.
    #[default]
    Stale,
    /// The exact end pose (`ease(1.0)`) is applied before the tween retires.
    SnapToEnd,
}

/// Configuration for a [`BasicAnimationManager`](crate::animation::BasicAnimationManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TweenSettings {
    pub completion: TweenCompletion,
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

/// Configuration for [`SkeletalHierarchy`](crate::skeleton::SkeletalHierarchy) construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HierarchySettings {
    /// Maximum number of parent hops in an upward root walk before the walk
    /// is reported as a cycle. `None` uses the member count plus one.
    pub max_walk: Option<usize>,
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// All animation settings in one place, for hosts that configure the
/// subsystem from a single struct.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationSettings {
    pub animator: AnimatorSettings,
    pub tween: TweenSettings,
    pub hierarchy: HierarchySettings,
}
