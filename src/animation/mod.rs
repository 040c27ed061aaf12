pub mod animator;
pub mod bone_clip;
pub mod clip;
pub mod curves;
pub mod moment;
pub mod timeline;
pub mod tracks;
pub mod tween;

pub use animator::{Animator, AnimatorState, SkeletonConsumer, TickReport};
pub use bone_clip::{BoneClip, BoneCursor};
pub use clip::AnimClip;
pub use curves::CurveKind;
pub use moment::AnimMoment;
pub use timeline::Timeline;
pub use tracks::{Interpolatable, KeyBracket, KeyframeCursor, KeyframeTrack};
pub use tween::{AnimDetails, BasicAnimationManager, TweenTargets};
