//! Model hierarchy: an arena of nodes with cached model-space transforms.

mod model;
mod node;

pub use model::Model;
pub use node::{ModelNode, NodeId};
