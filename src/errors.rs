//! Error Types
//!
//! This module defines the error types used throughout the animation core.
//!
//! # Overview
//!
//! The main error type [`AnimationError`] covers the failure modes of:
//! - Clip construction (malformed keyframe data)
//! - Skeletal hierarchy construction (missing roots, cycles)
//! - Per-frame lookups (members that do not exist)
//!
//! Construction-time errors abort the build of the owning object. Lookup
//! misses are returned to the caller, but the per-frame drivers
//! ([`Animator`](crate::animation::Animator) and
//! [`BasicAnimationManager`](crate::animation::BasicAnimationManager))
//! absorb them and keep going.
//!
//! # Usage
//!
//! ```rust,ignore
//! use contraption::errors::{AnimationError, Result};
//!
//! fn load_clip() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the animation core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    // ========================================================================
    // Lookup Misses (non-fatal)
    // ========================================================================
    /// A pose was pushed for a member name that the skeleton does not contain.
    #[error("Skeleton member not found: {0}")]
    MemberNotFound(String),

    /// A bone in the import list has no node of the same name in the node graph.
    #[error("No scene node matches bone: {0}")]
    BoneNodeNotFound(String),

    // ========================================================================
    // Clip Errors (fatal at load time)
    // ========================================================================
    /// Keyframe data for a bone cannot be sampled.
    #[error("Malformed clip for bone '{bone}': {reason}")]
    MalformedClip {
        /// Name of the offending bone clip
        bone: String,
        /// What is wrong with its keys
        reason: String,
    },

    /// Clip duration or tick rate is negative or not finite.
    #[error("Invalid clip timing: duration {duration}, ticks per second {ticks_per_second}")]
    InvalidClipTiming {
        /// Duration in ticks
        duration: f32,
        /// Playback rate
        ticks_per_second: f32,
    },

    // ========================================================================
    // Structural Errors (fatal at hierarchy build)
    // ========================================================================
    /// No member without a parent could be found.
    #[error("Skeletal hierarchy has no root")]
    NoRoot,

    /// Walking parent links from a member never reached a root.
    #[error("Cycle detected in skeletal hierarchy at member '{member}'")]
    CycleDetected {
        /// Member where the walk started
        member: String,
    },

    /// Two disjoint trees were built from the same bone list.
    #[error("Skeletal hierarchy has more than one root: '{first}' and '{second}'")]
    MultipleRoots {
        /// Root reached from the first member
        first: String,
        /// A different root reached from another member
        second: String,
    },

    /// A member was attached under two different parents.
    #[error("Member '{member}' already has parent '{existing}', cannot attach to '{requested}'")]
    ConflictingParent {
        /// The child member
        member: String,
        /// Its current parent
        existing: String,
        /// The parent the build tried to attach it to
        requested: String,
    },
}

impl AnimationError {
    /// Returns `true` for lookup misses, which callers may skip and continue past.
    #[inline]
    #[must_use]
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::MemberNotFound(_) | Self::BoneNodeNotFound(_))
    }

    pub(crate) fn malformed(bone: &str, reason: impl Into<String>) -> Self {
        Self::MalformedClip {
            bone: bone.to_string(),
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
