//! A model: node hierarchy plus the meshes, materials and clips it uses.

use super::{ModelNode, NodeId};
use crate::animation::Animation;
use crate::geometry::Mesh;
use crate::material::Material;
use crate::math::{Box3, Matrix4};
use serde::{Deserialize, Serialize};

/// Node arena with shared resources.
///
/// Node 0 is the root. Every node caches its transform relative to the
/// root; [`Model::set_node_transform`] keeps that cache current for the
/// whole subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name.
    pub name: String,
    nodes: Vec<ModelNode>,
    /// Meshes referenced by node mesh indices.
    pub meshes: Vec<Mesh>,
    /// Materials referenced by mesh material indices.
    pub materials: Vec<Material>,
    /// Animation clips.
    pub animations: Vec<Animation>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new("model")
    }
}

impl Model {
    /// Create a model with a single root node.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            nodes: vec![ModelNode::new(name.clone(), None, Matrix4::IDENTITY)],
            name,
            meshes: Vec::new(),
            materials: Vec::new(),
            animations: Vec::new(),
        }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes including the root.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&ModelNode> {
        self.nodes.get(id.0)
    }

    /// All nodes with their ids, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ModelNode)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// First node with the given name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    fn valid(&self, id: NodeId) -> bool {
        let ok = id.0 < self.nodes.len();
        debug_assert!(ok, "{id} does not exist");
        if !ok {
            log::warn!("{} does not exist ({} nodes)", id, self.nodes.len());
        }
        ok
    }

    /// Add a child node. An unknown parent attaches to the root.
    pub fn add_node(&mut self, parent: NodeId, name: impl Into<String>, mtx_rel_to_parent: Matrix4) -> NodeId {
        let parent = if self.valid(parent) { parent } else { self.root() };
        let id = NodeId(self.nodes.len());
        let mut node = ModelNode::new(name, Some(parent), mtx_rel_to_parent);
        node.mtx_rel_to_model = self.nodes[parent.0].mtx_rel_to_model * mtx_rel_to_parent;
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Replace a node's local transform and refresh the cached model
    /// transforms of the node and everything below it.
    pub fn set_node_transform(&mut self, id: NodeId, mtx_rel_to_parent: Matrix4) {
        if !self.valid(id) {
            return;
        }
        self.nodes[id.0].mtx_rel_to_parent = mtx_rel_to_parent;

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent_mtx = match self.nodes[current.0].parent {
                Some(p) => self.nodes[p.0].mtx_rel_to_model,
                None => Matrix4::IDENTITY,
            };
            let node = &mut self.nodes[current.0];
            node.mtx_rel_to_model = parent_mtx * node.mtx_rel_to_parent;
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Nodes below and including `start`, parents before children.
    pub fn depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        if !self.valid(start) {
            return order;
        }
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }

    /// Add a mesh and return its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add an animation clip and return its index.
    pub fn add_animation(&mut self, animation: Animation) -> usize {
        self.animations.push(animation);
        self.animations.len() - 1
    }

    /// Animation clip by name.
    pub fn find_animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Attach a mesh to a node.
    pub fn attach_mesh(&mut self, node: NodeId, mesh_index: usize) {
        let mesh_ok = mesh_index < self.meshes.len();
        debug_assert!(mesh_ok, "mesh {mesh_index} does not exist");
        if !mesh_ok {
            log::warn!("mesh {} does not exist ({} meshes)", mesh_index, self.meshes.len());
            return;
        }
        if self.valid(node) {
            self.nodes[node.0].mesh_indices.push(mesh_index);
        }
    }

    /// Axis-aligned bounds of every attached mesh in model space.
    pub fn bounds(&self) -> Box3 {
        let mut bounds = Box3::default();
        for node in &self.nodes {
            for mesh in node.mesh_indices.iter().filter_map(|&i| self.meshes.get(i)) {
                for p in &mesh.positions {
                    bounds.expand(&node.mtx_rel_to_model.transform_point(p));
                }
            }
        }
        bounds
    }
}
