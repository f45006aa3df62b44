//! Scene Graph Data - Pure DOP
//!
//! Node tables accumulated during the chunk walk. No methods.
//! All decoding and resolution happens in scene_operations.rs

use glam::IVec3;
use rustc_hash::FxHashMap;

/// Placement node: carries a translation for the node it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformNode {
    /// Node id assigned by the stream.
    pub id: i32,
    /// Target node id, a group or shape that may appear later or never.
    pub child_id: i32,
    /// First-frame lattice translation. Rotation is present in the stream
    /// but never decoded; placement is translation-only.
    pub translation: IVec3,
}

/// Grouping node: ordered child node ids. Membership is recorded for
/// inspection, but resolution does not walk into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub id: i32,
    pub children: Vec<i32>,
}

/// Leaf node: ordered model references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeNode {
    pub id: i32,
    pub models: Vec<i32>,
}

/// The three node tables of a parsed stream.
///
/// Transforms keep encounter order so resolution applies them in a fixed
/// sequence; groups and shapes are only ever looked up by id.
#[derive(Debug, Clone, Default)]
pub struct SceneGraphData {
    pub transforms: Vec<TransformNode>,
    pub groups: FxHashMap<i32, GroupNode>,
    pub shapes: FxHashMap<i32, ShapeNode>,
}
