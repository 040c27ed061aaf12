use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One joint of the debug skeleton, ready for upload as a vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BoneVertex {
    pub position: [f32; 3],
    /// Distance from the root in parent hops, for colouring by depth.
    pub depth: f32,
}

impl BoneVertex {
    #[must_use]
    pub fn new(position: Vec3, depth: u32) -> Self {
        Self {
            position: position.to_array(),
            depth: depth as f32,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Line-list representation of a skeleton: one vertex per member and one
/// index pair per parent/child edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonDebugMesh {
    pub vertices: Vec<BoneVertex>,
    pub indices: Vec<u32>,
}

impl SkeletonDebugMesh {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.indices.len() / 2
    }

    /// Raw vertex bytes for a vertex buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for an index buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
