//! Two-phase import orchestration
//!
//! Phase 1 ([`parse_vox_bytes`]) validates the container header, walks
//! every chunk in stream order into accumulator tables, then resolves
//! scene translations onto the models. Phase 2 ([`import_vox_bytes`])
//! applies the import options and generates geometry. The phases are
//! public separately so hosts that want raw voxel data can stop after the
//! first.
//!
//! Unknown chunk tags are skipped by their declared size, which is what
//! lets streams written by newer editors keep importing.

use std::path::Path;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::constants::format::{MAGIC, SUPPORTED_VERSION};
use crate::constants::tags;
use crate::error::{FormatError, ParseError, VoxError, VoxResult};
use crate::format::{tag_label, ChunkCursor, RawChunk};
use crate::mesh::{build_scene_meshes, model_quad_count, ModelMesh};
use crate::model::{decode_size_chunk, decode_xyzi_chunk, VoxelModel};
use crate::palette::{
    apply_gamma, create_material_table, create_palette, decode_matl_chunk, decode_rgba_chunk,
    MaterialTable, PaletteData,
};
use crate::scene::{
    decode_group_chunk, decode_shape_chunk, decode_transform_chunk, resolve_translations,
    SceneGraphData,
};
use crate::ImportOptions;

/// Everything phase 1 extracts from a stream: models with resolved
/// translations, the raw (un-gammaed) palette, materials, and the scene
/// node tables for hosts that want to inspect them.
#[derive(Debug, Clone)]
pub struct VoxFileData {
    pub version: i32,
    pub models: Vec<VoxelModel>,
    pub palette: PaletteData,
    pub materials: MaterialTable,
    pub graph: SceneGraphData,
}

/// The renderable handoff: geometry plus the tables that give it color
/// and surface properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxImport {
    pub palette: PaletteData,
    pub materials: MaterialTable,
    pub meshes: Vec<ModelMesh>,
}

/// Accumulator threaded through the chunk walk. One per import, never
/// shared across streams.
struct ParseAccumulator {
    pending_size: Option<IVec3>,
    models: Vec<VoxelModel>,
    palette: PaletteData,
    materials: MaterialTable,
    graph: SceneGraphData,
}

/// Phase 1: decode a VOX stream into voxel models and tables.
pub fn parse_vox_bytes(bytes: &[u8]) -> VoxResult<VoxFileData> {
    let mut stream = ChunkCursor::new(bytes, "stream");
    let version = read_header(&mut stream)?;

    let mut accumulator = ParseAccumulator {
        pending_size: None,
        models: Vec::new(),
        palette: create_palette(),
        materials: create_material_table(),
        graph: SceneGraphData::default(),
    };
    while !stream.is_empty() {
        let chunk = stream.read_chunk()?;
        decode_chunk(&chunk, &mut accumulator)?;
    }

    resolve_translations(&accumulator.graph, &mut accumulator.models);

    log::debug!(
        "[parse_vox_bytes] version {version}: {} models, {} transforms, {} groups, {} shapes",
        accumulator.models.len(),
        accumulator.graph.transforms.len(),
        accumulator.graph.groups.len(),
        accumulator.graph.shapes.len()
    );

    Ok(VoxFileData {
        version,
        models: accumulator.models,
        palette: accumulator.palette,
        materials: accumulator.materials,
        graph: accumulator.graph,
    })
}

/// Validates magic, version, and the empty MAIN root chunk.
fn read_header(stream: &mut ChunkCursor<'_>) -> VoxResult<i32> {
    let magic = stream.read_tag()?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic }.into());
    }
    let version = stream.read_i32()?;
    if version != SUPPORTED_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: version,
            expected: SUPPORTED_VERSION,
        }
        .into());
    }

    let root = stream.read_chunk()?;
    if root.tag != tags::MAIN {
        return Err(FormatError::BadRootChunk {
            found: tag_label(&root.tag),
        }
        .into());
    }
    if !root.content.is_empty() {
        return Err(FormatError::RootContentNotEmpty {
            size: root.content.len(),
        }
        .into());
    }
    Ok(version)
}

fn decode_chunk(chunk: &RawChunk<'_>, accumulator: &mut ParseAccumulator) -> VoxResult<()> {
    let mut cursor = chunk.cursor();
    match chunk.tag {
        tags::SIZE => {
            accumulator.pending_size = Some(decode_size_chunk(&mut cursor)?);
        }
        tags::XYZI => {
            let size = accumulator
                .pending_size
                .take()
                .ok_or(ParseError::OrphanVoxelData)?;
            let id = accumulator.models.len() as u32;
            accumulator
                .models
                .push(decode_xyzi_chunk(&mut cursor, id, size)?);
        }
        tags::RGBA => decode_rgba_chunk(&mut cursor, &mut accumulator.palette)?,
        tags::MATL => decode_matl_chunk(&mut cursor, &mut accumulator.materials)?,
        tags::TRANSFORM => {
            let node = decode_transform_chunk(&mut cursor)?;
            accumulator.graph.transforms.push(node);
        }
        tags::GROUP => {
            let node = decode_group_chunk(&mut cursor)?;
            accumulator.graph.groups.insert(node.id, node);
        }
        tags::SHAPE => {
            let node = decode_shape_chunk(&mut cursor)?;
            accumulator.graph.shapes.insert(node.id, node);
        }
        _ => {
            // Content was sliced by declared size already; dropping the
            // cursor without finish() is the skip
            log::debug!(
                "[decode_chunk] skipping unknown chunk {} ({} bytes)",
                tag_label(&chunk.tag),
                chunk.content.len()
            );
            return Ok(());
        }
    }
    cursor.finish()
}

/// Phase 1 + phase 2: decode a stream and generate placed geometry.
pub fn import_vox_bytes(bytes: &[u8], options: &ImportOptions) -> VoxResult<VoxImport> {
    options.validate()?;
    let file = parse_vox_bytes(bytes)?;

    let mut palette = file.palette;
    if options.gamma_correct {
        apply_gamma(&mut palette, options.gamma_value);
    }
    let meshes = build_scene_meshes(&file.models, options.voxel_size);

    log::info!(
        "[import_vox_bytes] imported {} models ({} quads) from {} bytes",
        meshes.len(),
        meshes.iter().map(model_quad_count).sum::<usize>(),
        bytes.len()
    );

    Ok(VoxImport {
        palette,
        materials: file.materials,
        meshes,
    })
}

/// Reads a `.vox` file from disk and imports it.
pub fn import_vox_file(path: impl AsRef<Path>, options: &ImportOptions) -> VoxResult<VoxImport> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| VoxError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!(
        "[import_vox_file] read {} bytes from {}",
        bytes.len(),
        path.display()
    );
    import_vox_bytes(&bytes, options)
}
