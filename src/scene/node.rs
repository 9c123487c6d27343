//! Nodes of a model's transform hierarchy.

use crate::math::Matrix4;
use serde::{Deserialize, Serialize};

/// Index of a node inside its [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the model's node list.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A named transform with attached meshes.
///
/// Children are owned by the model's node list; `parent` is a back
/// reference used for traversal only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelNode {
    /// Node name, matched against animation channels and bones.
    pub name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) mtx_rel_to_parent: Matrix4,
    pub(crate) mtx_rel_to_model: Matrix4,
    /// Indices into the model's meshes.
    pub mesh_indices: Vec<usize>,
}

impl ModelNode {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>, mtx_rel_to_parent: Matrix4) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            mtx_rel_to_parent,
            mtx_rel_to_model: mtx_rel_to_parent,
            mesh_indices: Vec::new(),
        }
    }

    /// Parent node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Static transform relative to the parent.
    #[inline]
    pub fn mtx_rel_to_parent(&self) -> &Matrix4 {
        &self.mtx_rel_to_parent
    }

    /// Cached transform relative to the model root.
    #[inline]
    pub fn mtx_rel_to_model(&self) -> &Matrix4 {
        &self.mtx_rel_to_model
    }
}
