use std::fmt::Write as _;

use glam::{Affine3A, Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::animation::SkeletonConsumer;
use crate::errors::{AnimationError, Result};
use crate::settings::HierarchySettings;
use crate::skeleton::debug_mesh::{BoneVertex, SkeletonDebugMesh};
use crate::skeleton::import::{ImportBone, NodeGraph, NodeIndex};
use crate::transform::Transform;

new_key_type! {
    /// Stable handle of a member within its hierarchy.
    pub struct MemberKey;
}

/// A named joint of the skeleton.
///
/// A member first referenced as someone's parent is created as a
/// placeholder with no bone data; it is completed in place when its own
/// bone comes up in the import list.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    offset: Option<Mat4>,
    node: Option<NodeIndex>,

    pub(crate) parent: Option<MemberKey>,
    pub(crate) children: SmallVec<[MemberKey; 4]>,

    /// Local pose relative to the parent member.
    pub transform: Transform,
    world_matrix: Affine3A,
}

impl Member {
    fn placeholder(name: &str) -> Self {
        Self {
            name: name.to_string(),
            offset: None,
            node: None,
            parent: None,
            children: SmallVec::new(),
            transform: Transform::new(),
            world_matrix: Affine3A::IDENTITY,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bone offset (mesh space to bone space), if bone data has arrived.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Option<&Mat4> {
        self.offset.as_ref()
    }

    /// Index of the matching node in the import graph.
    #[inline]
    #[must_use]
    pub fn node(&self) -> Option<NodeIndex> {
        self.node
    }

    #[inline]
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.offset.is_none()
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<MemberKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[MemberKey] {
        &self.children
    }

    /// World matrix as of the last [`SkeletalHierarchy::rebuild_mesh`].
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }
}

/// Rooted bone tree built from importer bone and node data.
///
/// Members live in an arena addressed by [`MemberKey`], with a name index
/// on top. Parents own their children through the child lists; the parent
/// link is a plain key used for upward walks.
#[derive(Debug, Clone)]
pub struct SkeletalHierarchy {
    members: SlotMap<MemberKey, Member>,
    name_to_member: FxHashMap<String, MemberKey>,
    root: MemberKey,
    settings: HierarchySettings,
    debug_mesh: SkeletonDebugMesh,
}

impl SkeletalHierarchy {
    /// Builds the hierarchy for `bones` by matching each against `graph`.
    ///
    /// Bones are accepted in any order. Bones with no node of the same name
    /// are skipped with a warning. Fails if the result has no single root,
    /// contains a cycle, or attaches a member under two parents.
    pub fn build(graph: &NodeGraph, bones: &[ImportBone], settings: HierarchySettings) -> Result<Self> {
        let mut builder = Builder::default();

        for bone in bones {
            let Some(node_index) = graph.find_by_name(&bone.name) else {
                log::warn!("{}", AnimationError::BoneNodeNotFound(bone.name.clone()));
                continue;
            };

            let key = builder.get_or_insert(&bone.name);
            {
                let member = &mut builder.members[key];
                member.offset = Some(bone.offset);
                member.node = Some(node_index);
                if let Some(node) = graph.get(node_index) {
                    member.transform = Transform::from_matrix(node.transform);
                }
            }

            let parent = graph
                .get(node_index)
                .and_then(|node| node.parent)
                .and_then(|index| graph.get(index).map(|node| (index, node)));

            match parent {
                Some((parent_index, parent_node)) => {
                    let parent_key = builder.get_or_insert(&parent_node.name);
                    builder.place(parent_key, parent_index, parent_node.transform);
                    builder.attach(parent_key, key)?;
                }
                None => log::debug!("Bone '{}' sits on the scene root node", bone.name),
            }
        }

        let Builder {
            members,
            name_to_member,
        } = builder;

        let mut hierarchy = Self {
            members,
            name_to_member,
            root: MemberKey::default(),
            settings,
            debug_mesh: SkeletonDebugMesh::default(),
        };
        hierarchy.root = hierarchy.resolve_root()?;

        log::debug!(
            "Built skeletal hierarchy: {} members, root '{}'\n{}",
            hierarchy.len(),
            hierarchy.members[hierarchy.root].name,
            hierarchy.dump_tree()
        );

        hierarchy.rebuild_mesh();
        Ok(hierarchy)
    }

    /// Walks parent links upward from `start` to the member with no parent.
    ///
    /// Fails with [`AnimationError::MemberNotFound`] if `start` (or a link on
    /// the way up) is not in the hierarchy, for example after
    /// [`remove_child`](Self::remove_child), and with
    /// [`AnimationError::CycleDetected`] if the walk exceeds the configured cap.
    pub fn get_root(&self, start: MemberKey) -> Result<MemberKey> {
        let cap = self.walk_cap();
        let mut current = start;

        for _ in 0..cap {
            let Some(member) = self.members.get(current) else {
                return Err(AnimationError::MemberNotFound(format!("{current:?}")));
            };
            match member.parent {
                Some(parent) => current = parent,
                None => return Ok(current),
            }
        }

        Err(AnimationError::CycleDetected {
            member: self.name_of(start).to_string(),
        })
    }

    /// Finds the single root and checks every member reaches it.
    fn resolve_root(&self) -> Result<MemberKey> {
        let Some((first, _)) = self.members.iter().next() else {
            return Err(AnimationError::NoRoot);
        };
        let root = self.get_root(first)?;

        // Members already known to reach `root`
        let mut reaches_root: SecondaryMap<MemberKey, ()> = SecondaryMap::new();
        reaches_root.insert(root, ());

        let cap = self.walk_cap();
        for (start, _) in &self.members {
            let mut path: SmallVec<[MemberKey; 16]> = SmallVec::new();
            let mut current = start;

            loop {
                if reaches_root.contains_key(current) {
                    break;
                }
                if path.len() >= cap {
                    return Err(AnimationError::CycleDetected {
                        member: self.name_of(start).to_string(),
                    });
                }
                path.push(current);

                match self.members[current].parent {
                    Some(parent) => current = parent,
                    None => {
                        return Err(AnimationError::MultipleRoots {
                            first: self.name_of(root).to_string(),
                            second: self.name_of(current).to_string(),
                        });
                    }
                }
            }

            for key in path {
                reaches_root.insert(key, ());
            }
        }

        Ok(root)
    }

    fn walk_cap(&self) -> usize {
        self.settings
            .max_walk
            .unwrap_or(self.members.len() + 1)
    }

    fn name_of(&self, key: MemberKey) -> &str {
        self.members.get(key).map_or("<removed>", |m| m.name.as_str())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn root(&self) -> MemberKey {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: MemberKey) -> Option<&Member> {
        self.members.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: MemberKey) -> Option<&mut Member> {
        self.members.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn key_of(&self, name: &str) -> Option<MemberKey> {
        self.name_to_member.get(name).copied()
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.key_of(name).and_then(|key| self.members.get(key))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for a successfully built hierarchy.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemberKey, &Member)> {
        self.members.iter()
    }

    /// Member keys in depth-first pre-order from the root.
    #[must_use]
    pub fn depth_first(&self) -> Vec<MemberKey> {
        let mut order = Vec::with_capacity(self.members.len());
        let mut stack = vec![self.root];

        while let Some(key) = stack.pop() {
            let Some(member) = self.members.get(key) else {
                continue;
            };
            order.push(key);
            // Reverse so the first child is visited first
            stack.extend(member.children.iter().rev().copied());
        }
        order
    }

    /// Indented listing of the tree, one tab per level.
    #[must_use]
    pub fn dump_tree(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((key, depth)) = stack.pop() {
            let Some(member) = self.members.get(key) else {
                continue;
            };
            for _ in 0..depth {
                out.push('\t');
            }
            let _ = writeln!(
                out,
                "{}{}",
                member.name,
                if member.is_placeholder() { " (placeholder)" } else { "" }
            );
            stack.extend(member.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Sets the local pose of the named member.
    ///
    /// Returns [`AnimationError::MemberNotFound`] if no member has that name;
    /// nothing is changed in that case.
    pub fn update_member(&mut self, name: &str, position: Vec3, rotation: Quat) -> Result<()> {
        let Some(member) = self
            .name_to_member
            .get(name)
            .and_then(|&key| self.members.get_mut(key))
        else {
            log::debug!("update_member: no member named '{name}'");
            return Err(AnimationError::MemberNotFound(name.to_string()));
        };

        member.transform.set_pose(position, rotation);
        Ok(())
    }

    /// Detaches `child` from `parent` and drops the child's whole subtree.
    ///
    /// Returns the number of members removed, `0` if `child` is not a
    /// child of `parent`.
    pub fn remove_child(&mut self, parent: MemberKey, child: MemberKey) -> usize {
        let Some(parent_member) = self.members.get_mut(parent) else {
            return 0;
        };
        let Some(pos) = parent_member.children.iter().position(|&c| c == child) else {
            return 0;
        };
        parent_member.children.remove(pos);

        let mut removed = 0;
        let mut stack = vec![child];
        while let Some(key) = stack.pop() {
            if let Some(member) = self.members.remove(key) {
                self.name_to_member.remove(&member.name);
                stack.extend(member.children);
                removed += 1;
            }
        }
        removed
    }

    /// Recomputes world matrices and the debug line mesh.
    ///
    /// Walks the tree depth-first from the root, emitting one vertex per
    /// member and one line per parent/child pair.
    pub fn rebuild_mesh(&mut self) {
        let mut mesh = std::mem::take(&mut self.debug_mesh);
        mesh.clear();

        // (member, parent world matrix, parent vertex index, depth)
        let mut stack: Vec<(MemberKey, Affine3A, Option<u32>, u32)> =
            vec![(self.root, Affine3A::IDENTITY, None, 0)];

        while let Some((key, parent_world, parent_vertex, depth)) = stack.pop() {
            let Some(member) = self.members.get_mut(key) else {
                continue;
            };

            member.transform.update_local_matrix();
            let world = parent_world * *member.transform.local_matrix();
            member.world_matrix = world;

            let vertex = mesh.vertices.len() as u32;
            mesh.vertices
                .push(BoneVertex::new(world.translation.into(), depth));
            if let Some(parent_vertex) = parent_vertex {
                mesh.indices.extend_from_slice(&[parent_vertex, vertex]);
            }

            stack.extend(
                member
                    .children
                    .iter()
                    .rev()
                    .map(|&c| (c, world, Some(vertex), depth + 1)),
            );
        }

        self.debug_mesh = mesh;
    }

    #[inline]
    #[must_use]
    pub fn debug_mesh(&self) -> &SkeletonDebugMesh {
        &self.debug_mesh
    }
}

impl SkeletonConsumer for SkeletalHierarchy {
    fn update_member(&mut self, name: &str, position: Vec3, rotation: Quat) -> Result<()> {
        SkeletalHierarchy::update_member(self, name, position, rotation)
    }

    fn finalize_mesh(&mut self) {
        self.rebuild_mesh();
    }
}

/// Mutable state of a hierarchy under construction.
#[derive(Default)]
struct Builder {
    members: SlotMap<MemberKey, Member>,
    name_to_member: FxHashMap<String, MemberKey>,
}

impl Builder {
    /// Returns the member named `name`, creating a placeholder if needed.
    fn get_or_insert(&mut self, name: &str) -> MemberKey {
        if let Some(&key) = self.name_to_member.get(name) {
            return key;
        }
        let key = self.members.insert(Member::placeholder(name));
        self.name_to_member.insert(name.to_string(), key);
        key
    }

    /// Gives a member its node and bind pose if it has none yet.
    ///
    /// Placeholders get their parent node's pose this way, so a transformed
    /// non-bone ancestor still moves the skeleton.
    fn place(&mut self, key: MemberKey, node: NodeIndex, transform: Mat4) {
        let member = &mut self.members[key];
        if member.node.is_none() {
            member.node = Some(node);
            member.transform = Transform::from_matrix(transform);
        }
    }

    fn attach(&mut self, parent: MemberKey, child: MemberKey) -> Result<()> {
        if parent == child {
            return Err(AnimationError::CycleDetected {
                member: self.members[child].name.clone(),
            });
        }

        match self.members[child].parent {
            Some(existing) if existing == parent => return Ok(()),
            Some(existing) => {
                return Err(AnimationError::ConflictingParent {
                    member: self.members[child].name.clone(),
                    existing: self.members[existing].name.clone(),
                    requested: self.members[parent].name.clone(),
                });
            }
            None => {}
        }

        self.members[child].parent = Some(parent);
        self.members[parent].children.push(child);
        Ok(())
    }
}
