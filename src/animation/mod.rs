//! Keyframe animation of node transforms.
//!
//! A clip holds one channel per animated node with independent
//! translation, rotation and scale tracks. The sampler walks a model's
//! node tree and produces per-node matrices and skinning palettes.

mod animation_clip;
mod interpolant;
mod keyframe_track;
mod sampler;

pub use animation_clip::{Animation, AnimationChannel, DEFAULT_TICKS_PER_SECOND};
pub use interpolant::{Interpolate, InterpolationMode};
pub use keyframe_track::{Keyframe, KeyframeTrack};
pub use sampler::{bone_palette, AnimationSampler, NodeTransform};
