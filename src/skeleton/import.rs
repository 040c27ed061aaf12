//! Scene-import data consumed once when a skeletal hierarchy is built.
//!
//! Asset importers produce two parallel structures: a flat list of bones
//! (name plus offset matrix) and a node graph (names with parent/child
//! links and bind-pose transforms). Bones refer to nodes by name only.

use glam::Mat4;
use smallvec::SmallVec;

/// A skinning bone as delivered by the importer.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBone {
    pub name: String,
    /// Mesh space to bone space, at bind time.
    pub offset: Mat4,
}

impl ImportBone {
    #[must_use]
    pub fn new(name: impl Into<String>, offset: Mat4) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Index of a node within its [`NodeGraph`].
pub type NodeIndex = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct ImportNode {
    pub name: String,
    pub parent: Option<NodeIndex>,
    pub children: SmallVec<[NodeIndex; 4]>,
    /// Local bind-pose transform relative to the parent node.
    pub transform: Mat4,
}

/// The importer's scene graph, rooted at node `0`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGraph {
    nodes: Vec<ImportNode>,
}

impl NodeGraph {
    /// Creates a graph holding only its root node.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![ImportNode {
                name: root_name.into(),
                parent: None,
                children: SmallVec::new(),
                transform: Mat4::IDENTITY,
            }],
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        0
    }

    /// Appends a node under `parent` and returns its index.
    ///
    /// # Panics
    /// If `parent` is not an index of this graph.
    pub fn add_child(
        &mut self,
        parent: NodeIndex,
        name: impl Into<String>,
        transform: Mat4,
    ) -> NodeIndex {
        assert!(parent < self.nodes.len(), "parent node {parent} out of range");

        let index = self.nodes.len();
        self.nodes.push(ImportNode {
            name: name.into(),
            parent: Some(parent),
            children: SmallVec::new(),
            transform,
        });
        self.nodes[parent].children.push(index);
        index
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&ImportNode> {
        self.nodes.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a graph has at least its root.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn parent_of(&self, index: NodeIndex) -> Option<&ImportNode> {
        self.nodes
            .get(index)
            .and_then(|n| n.parent)
            .and_then(|p| self.nodes.get(p))
    }

    /// Depth-first search from the root for a node named `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.find_from(self.root(), name)
    }

    fn find_from(&self, current: NodeIndex, name: &str) -> Option<NodeIndex> {
        let node = self.nodes.get(current)?;
        if node.name == name {
            return Some(current);
        }
        for &child in &node.children {
            if let Some(found) = self.find_from(child, name) {
                return Some(found);
            }
        }
        None
    }
}
