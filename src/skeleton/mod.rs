//! Skeletal hierarchy built from scene-import data.
//!
//! - [`import`]: the bone list and node graph handed over by an importer
//! - [`hierarchy`]: the rooted member tree that receives animated poses
//! - [`debug_mesh`]: the line-list view of the tree used for debug drawing

pub mod debug_mesh;
pub mod hierarchy;
pub mod import;

pub use debug_mesh::{BoneVertex, SkeletonDebugMesh};
pub use hierarchy::{Member, MemberKey, SkeletalHierarchy};
pub use import::{ImportBone, ImportNode, NodeGraph, NodeIndex};
