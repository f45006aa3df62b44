//! Scene graph nodes and placement
//!
//! nTRN/nGRP/nSHP decoding into flat node tables, and the single-hop
//! transform-to-shape resolution pass that places models on the lattice.

mod scene_data;
mod scene_operations;

pub use scene_data::{GroupNode, SceneGraphData, ShapeNode, TransformNode};
pub use scene_operations::{
    decode_group_chunk, decode_shape_chunk, decode_transform_chunk, resolve_translations,
};
