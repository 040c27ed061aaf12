#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Animation core of the Contraption demo engine.
//!
//! - [`animation`]: easing curves, timelines, keyframe clips, the skeletal
//!   [`Animator`] and the curve-driven tween manager
//! - [`skeleton`]: the bone hierarchy that receives animated poses
//! - [`transform`]: TRS transforms shared by both
//!
//! Everything is single-threaded and driven once per frame by the host:
//!
//! ```rust,ignore
//! let report = animator.tick(dt, &mut hierarchy);
//! tweens.update(dt, &mut transforms);
//! ```

pub mod animation;
pub mod errors;
pub mod settings;
pub mod skeleton;
pub mod transform;

pub use animation::{
    AnimClip, AnimDetails, AnimMoment, Animator, AnimatorState, BasicAnimationManager, BoneClip,
    CurveKind, SkeletonConsumer, Timeline,
};
pub use errors::{AnimationError, Result};
pub use settings::{
    AnimationSettings, AnimatorSettings, DeltaUnit, HierarchySettings, TweenCompletion,
    TweenSettings,
};
pub use skeleton::{ImportBone, NodeGraph, SkeletalHierarchy};
pub use transform::{PositionTarget, Transform};
