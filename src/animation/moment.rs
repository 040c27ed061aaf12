use glam::{Quat, Vec3};

/// The sampled pose of one bone at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimMoment {
    pub bone_name: String,
    pub position: Vec3,
    pub rotation: Quat,
}

impl AnimMoment {
    #[must_use]
    pub fn new(bone_name: impl Into<String>, position: Vec3, rotation: Quat) -> Self {
        Self {
            bone_name: bone_name.into(),
            position,
            rotation,
        }
    }
}
