use glam::{Affine3A, Mat4, Quat, Vec3};

/// Anything a tween can move.
///
/// Implemented by [`Transform`]; hosts with their own transform type implement
/// it directly.
pub trait PositionTarget {
    fn set_position(&mut self, position: Vec3);
}

/// Transform component
///
/// Position, rotation and scale (TRS) of a skeleton member or scene object,
/// with a cached local matrix and shadow-state dirty checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,

    // Shadow state for dirty checking
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    /// Builds a transform by decomposing a bind-pose matrix.
    ///
    /// Shear in `mat` is lost in the decomposition.
    #[must_use]
    pub fn from_matrix(mat: Mat4) -> Self {
        let mut transform = Self::new();
        transform.apply_local_matrix(Affine3A::from_mat4(mat));
        transform
    }

    /// Recomputes the local matrix if any TRS component changed.
    ///
    /// Returns whether the matrix was rebuilt.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// Sets position and rotation in one call, as a sampled pose does.
    #[inline]
    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Returns the cached local matrix. Call [`update_local_matrix`](Self::update_local_matrix)
    /// first if TRS may have changed.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// Sets the local matrix directly and decomposes it back into TRS.
    pub fn apply_local_matrix(&mut self, mat: Affine3A) {
        self.local_matrix = mat;

        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.position = translation;

        self.last_scale = scale;
        self.last_rotation = rotation;
        self.last_position = translation;

        self.mark_dirty();
    }

    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionTarget for Transform {
    #[inline]
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
