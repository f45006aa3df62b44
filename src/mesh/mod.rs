//! Quad mesh generation
//!
//! Per-model, per-color face-culling surface extraction with placement
//! baked into world-space vertices.

mod mesh_data;
mod mesh_operations;

pub use mesh_data::{ColorMesh, MeshVertex, ModelMesh};
pub use mesh_operations::{
    build_model_mesh, build_scene_meshes, model_quad_count, model_vertex_count,
};
