//! Scene graph mirror of the remote engine's object hierarchy.

mod graph;
mod node;

pub use graph::{SceneError, SceneGraph};
pub use node::{ObjectNode, SpatialEntity};
