//! Mesh Output Data - Pure DOP
//!
//! Generated geometry structures. No methods.
//! All generation and summaries happen in mesh_operations.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;

/// One mesh vertex, world-space position only.
///
/// Hosts derive normals from the quad winding and colors from the palette,
/// so the layout stays byte-stable for direct buffer upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
}

assert_eq_size!(MeshVertex, [u8; 12]);

/// The quads of a single color index within one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMesh {
    /// Palette color index (1..=255) shared by every quad in this part.
    pub color: u8,
    /// Four sequential vertices per quad, in face winding order.
    pub vertices: Vec<MeshVertex>,
    /// Vertex indices per exposed face.
    pub quads: Vec<[u32; 4]>,
}

/// Generated geometry for one model: per-color parts plus the placement
/// that was baked into the vertices.
///
/// Vertex positions are final world space (centered on the grid, scaled,
/// translated). `translation` and `scale` restate that placement for hosts
/// that organize objects around local origins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMesh {
    pub model_id: u32,
    /// World translation: lattice translation times the voxel size.
    pub translation: Vec3,
    /// Uniform world size of one voxel cube.
    pub scale: f32,
    /// Per-color parts, in first-seen color order. Colors whose voxels are
    /// fully enclosed produce no part.
    pub parts: Vec<ColorMesh>,
}
