//! Evaluate a clip over a model's node tree.

use super::Animation;
use crate::geometry::Mesh;
use crate::math::Matrix4;
use crate::scene::{Model, NodeId};

/// Sampled transform of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTransform {
    /// Node name.
    pub name: String,
    /// Local transform, animated or static.
    pub mtx_rel_to_parent: Matrix4,
    /// Transform relative to the sampled root.
    pub mtx_rel_to_model: Matrix4,
    /// True when a channel drove this node.
    pub animated: bool,
}

/// Samples clips into per-node transforms, reusing its output buffer.
#[derive(Debug, Clone, Default)]
pub struct AnimationSampler {
    transforms: Vec<NodeTransform>,
}

impl AnimationSampler {
    /// Create a sampler with an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the whole model at `seconds`.
    pub fn sample(&mut self, animation: &Animation, model: &Model, seconds: f64) -> &[NodeTransform] {
        self.sample_from(animation, model, model.root(), seconds)
    }

    /// Sample the subtree at `root`, parents before children.
    ///
    /// Nodes without a channel keep their static transform. `root` is
    /// composed with the identity.
    pub fn sample_from(&mut self, animation: &Animation, model: &Model, root: NodeId, seconds: f64) -> &[NodeTransform] {
        self.transforms.clear();
        let ticks = animation.ticks_at(seconds);

        let mut stack = vec![(root, Matrix4::IDENTITY)];
        while let Some((id, parent_mtx)) = stack.pop() {
            let Some(node) = model.node(id) else {
                log::warn!("{} does not exist in model '{}'", id, model.name);
                continue;
            };

            let channel = animation.channel(&node.name);
            let mtx_rel_to_parent = match channel {
                Some(channel) => channel.local_matrix(ticks),
                None => *node.mtx_rel_to_parent(),
            };
            let mtx_rel_to_model = parent_mtx * mtx_rel_to_parent;

            self.transforms.push(NodeTransform {
                name: node.name.clone(),
                mtx_rel_to_parent,
                mtx_rel_to_model,
                animated: channel.is_some(),
            });
            stack.extend(node.children().iter().rev().map(|&child| (child, mtx_rel_to_model)));
        }

        log::trace!("sampled '{}' at tick {:.3} over {} nodes", animation.name, ticks, self.transforms.len());
        &self.transforms
    }

    /// Output of the last sample.
    #[inline]
    pub fn transforms(&self) -> &[NodeTransform] {
        &self.transforms
    }

    /// Sampled transform of a node by name.
    pub fn find(&self, name: &str) -> Option<&NodeTransform> {
        self.transforms.iter().find(|t| t.name == name)
    }

    /// Skinning palette for `mesh` from the last sample.
    pub fn bone_palette(&self, mesh: &Mesh) -> Vec<Matrix4> {
        bone_palette(mesh, &self.transforms)
    }
}

/// `mtx_rel_to_model · mesh_to_bone` for every bone of `mesh`.
///
/// Bones whose node is missing from `transforms` get the identity.
pub fn bone_palette(mesh: &Mesh, transforms: &[NodeTransform]) -> Vec<Matrix4> {
    mesh.bones
        .iter()
        .map(|bone| match transforms.iter().find(|t| t.name == bone.name) {
            Some(t) => t.mtx_rel_to_model * bone.mesh_to_bone,
            None => {
                log::warn!("bone '{}' has no sampled node", bone.name);
                Matrix4::IDENTITY
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationChannel;
    use crate::geometry::Bone;
    use crate::math::{Quaternion, Vector3};

    fn rig() -> (Model, Animation) {
        let mut model = Model::new("rig");
        let hip = model.add_node(model.root(), "hip", Matrix4::IDENTITY);
        model.add_node(hip, "knee", Matrix4::translate(Vector3::new(0.0, 0.0, -1.0)));

        let mut clip = Animation::new("slide", 1.0, 1.0);
        let mut channel = AnimationChannel::new("hip");
        channel.add_translation(0.0, Vector3::ZERO).add_translation(1.0, Vector3::new(10.0, 0.0, 0.0));
        clip.add_channel(channel);
        (model, clip)
    }

    #[test]
    fn test_translation_halfway() {
        let (model, clip) = rig();
        let mut sampler = AnimationSampler::new();
        sampler.sample(&clip, &model, 0.5);

        let hip = sampler.find("hip").cloned();
        let hip = hip.map(|t| t.mtx_rel_to_parent.decompose());
        let (t, r, s) = hip.unwrap_or_default();
        assert!(t.approx_eq(&Vector3::new(5.0, 0.0, 0.0), 1e-12));
        assert!(r.same_rotation(&Quaternion::IDENTITY, 1e-12));
        assert!(s.approx_eq(&Vector3::ONE, 1e-12));
    }

    #[test]
    fn test_children_follow_parents() {
        let (model, clip) = rig();
        let mut sampler = AnimationSampler::new();
        let out = sampler.sample(&clip, &model, 0.5);
        let names: Vec<&str> = out.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["rig", "hip", "knee"]);
        assert!(!out[2].animated);
        let knee = out[2].mtx_rel_to_model.get_position();
        assert!(knee.approx_eq(&Vector3::new(5.0, 0.0, -1.0), 1e-12));
    }

    #[test]
    fn test_palette() {
        let (model, clip) = rig();
        let mut sampler = AnimationSampler::new();
        sampler.sample(&clip, &model, 0.5);

        let mut mesh = Mesh::new();
        mesh.add_bone(Bone::new("knee", Matrix4::translate(Vector3::new(0.0, 0.0, 1.0))));
        mesh.add_bone(Bone::new("missing", Matrix4::IDENTITY));
        let palette = sampler.bone_palette(&mesh);
        assert!(palette[0].get_position().approx_eq(&Vector3::new(5.0, 0.0, 0.0), 1e-12));
        assert_eq!(palette[1], Matrix4::IDENTITY);
    }
}
