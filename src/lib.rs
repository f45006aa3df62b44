//! voxmesh - MagicaVoxel scene import and surface extraction
//!
//! Decodes the chunked `.vox` container (voxel models, palette, materials,
//! and the transform/group/shape scene graph) and turns each model into
//! per-color quad meshes placed in world space. Two entry levels:
//!
//! - [`parse_vox_bytes`] stops at decoded data: sparse voxel models with
//!   resolved translations, the palette, materials, and scene node tables.
//! - [`import_vox_bytes`] / [`import_vox_file`] go all the way to the
//!   renderable handoff: geometry plus tables, with palette gamma and
//!   voxel scale applied per [`ImportOptions`].
//!
//! The crate follows a data-oriented layout: `*_data` modules hold plain
//! structs, `*_operations` modules hold the pure functions that decode and
//! transform them.

// Constants module
pub mod constants;

// Core modules
pub mod error;
pub mod format;

// Decoded data
pub mod model;
pub mod palette;
pub mod scene;

// Geometry generation
pub mod mesh;

// Orchestration
pub mod import;

use serde::{Deserialize, Serialize};

pub use error::{FormatError, ParseError, VoxError, VoxResult};
pub use format::{tag_label, ChunkCursor, RawChunk, VoxDict};
pub use import::{import_vox_bytes, import_vox_file, parse_vox_bytes, VoxFileData, VoxImport};
pub use mesh::{
    build_model_mesh, build_scene_meshes, model_quad_count, model_vertex_count, ColorMesh,
    MeshVertex, ModelMesh,
};
pub use model::{insert_voxel, voxel_at, Voxel, VoxelModel};
pub use palette::{material_props, palette_color, MaterialProps, MaterialTable, PaletteData, Rgba};
pub use scene::{GroupNode, SceneGraphData, ShapeNode, TransformNode};

/// Import configuration
///
/// The defaults mirror the editor's own export conventions: unit voxels
/// and palette colors gamma-corrected at 2.2 for linear-color renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Uniform world size of one voxel cube.
    pub voxel_size: f32,
    /// Raise palette RGB channels to `gamma_value`. Alpha stays linear.
    pub gamma_correct: bool,
    /// Gamma exponent applied when `gamma_correct` is set.
    pub gamma_value: f32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            voxel_size: 1.0,
            gamma_correct: true,
            gamma_value: 2.2,
        }
    }
}

impl ImportOptions {
    /// Validate option values before an import begins.
    pub fn validate(&self) -> VoxResult<()> {
        if !(self.voxel_size.is_finite() && self.voxel_size > 0.0) {
            return Err(VoxError::InvalidOptions {
                field: "voxel_size",
                reason: format!("{} is not a positive finite size", self.voxel_size),
            });
        }
        if self.gamma_correct && !(self.gamma_value.is_finite() && self.gamma_value > 0.0) {
            return Err(VoxError::InvalidOptions {
                field: "gamma_value",
                reason: format!("{} is not a positive finite exponent", self.gamma_value),
            });
        }
        Ok(())
    }
}
