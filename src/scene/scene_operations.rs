//! Scene Graph Operations - Pure DOP Functions
//!
//! nTRN, nGRP and nSHP chunk decoding plus the translation resolution pass
//! that runs once the whole stream is parsed. Reference problems inside
//! these chunks are semantic, not structural, so they are tolerated with a
//! debug log instead of failing the import.

use glam::IVec3;

use crate::error::VoxResult;
use crate::format::{read_dict, ChunkCursor, VoxDict};
use crate::model::VoxelModel;
use crate::scene::scene_data::{GroupNode, SceneGraphData, ShapeNode, TransformNode};

// ============================================================================
// Node decoding
// ============================================================================

/// Decodes an nTRN chunk.
///
/// Layout: node id, node attributes (ignored), child id, a reserved id, a
/// layer id, a frame count, then one attribute dictionary per frame. The
/// translation comes from the first frame; later frames are consumed so
/// the content length checks out, then dropped.
pub fn decode_transform_chunk(cursor: &mut ChunkCursor<'_>) -> VoxResult<TransformNode> {
    let id = cursor.read_i32()?;
    let _attributes = read_dict(cursor)?;
    let child_id = cursor.read_i32()?;
    let _reserved_id = cursor.read_i32()?;
    let _layer_id = cursor.read_i32()?;
    let frame_count = cursor.read_len("frame count")?;

    let mut translation = IVec3::ZERO;
    for frame in 0..frame_count {
        let attributes = read_dict(cursor)?;
        if frame == 0 {
            translation = frame_translation(&attributes);
        }
    }

    Ok(TransformNode {
        id,
        child_id,
        translation,
    })
}

/// Translation from a frame attribute dictionary.
///
/// `_t` holds three space-separated integers; strings in any other shape
/// fall back to the origin with a debug log. `_r` (rotation) is recognized
/// and dropped. Pairs apply in encounter order, so a repeated `_t` keeps
/// the last value.
fn frame_translation(attributes: &VoxDict) -> IVec3 {
    let mut translation = IVec3::ZERO;
    for (key, value) in attributes.iter() {
        match key {
            "_t" => {
                translation = match parse_translation(value) {
                    Some(parsed) => parsed,
                    None => {
                        log::debug!("[frame_translation] unknown translation format: {value:?}");
                        IVec3::ZERO
                    }
                };
            }
            "_r" => {}
            _ => {}
        }
    }
    translation
}

fn parse_translation(value: &str) -> Option<IVec3> {
    let parts: Vec<i32> = value
        .split(' ')
        .map(str::parse::<i32>)
        .collect::<Result<_, _>>()
        .ok()?;
    if parts.len() == 3 {
        Some(IVec3::new(parts[0], parts[1], parts[2]))
    } else {
        None
    }
}

/// Decodes an nGRP chunk: node id, node attributes (ignored), child count,
/// then one child node id per entry.
pub fn decode_group_chunk(cursor: &mut ChunkCursor<'_>) -> VoxResult<GroupNode> {
    let id = cursor.read_i32()?;
    let _attributes = read_dict(cursor)?;
    let count = cursor.read_len("child count")?;
    let mut children = Vec::with_capacity(count.min(cursor.remaining() / 4));
    for _ in 0..count {
        children.push(cursor.read_i32()?);
    }
    Ok(GroupNode { id, children })
}

/// Decodes an nSHP chunk: node id, node attributes (ignored), model count,
/// then per entry a model id and an attribute dictionary (ignored).
pub fn decode_shape_chunk(cursor: &mut ChunkCursor<'_>) -> VoxResult<ShapeNode> {
    let id = cursor.read_i32()?;
    let _attributes = read_dict(cursor)?;
    let count = cursor.read_len("model count")?;
    let mut models = Vec::with_capacity(count.min(cursor.remaining() / 8));
    for _ in 0..count {
        models.push(cursor.read_i32()?);
        let _model_attributes = read_dict(cursor)?;
    }
    Ok(ShapeNode { id, models })
}

// ============================================================================
// Resolution
// ============================================================================

/// Assigns each transform's translation to the models of the shape node it
/// targets, in transform encounter order.
///
/// Resolution is a single hop: a transform that targets a group node is a
/// recorded no-op, so models under grouped hierarchies keep their default
/// placement at the origin. Dangling ids on either side are tolerated.
pub fn resolve_translations(graph: &SceneGraphData, models: &mut [VoxelModel]) {
    for transform in &graph.transforms {
        if let Some(shape) = graph.shapes.get(&transform.child_id) {
            for &model_id in &shape.models {
                let slot = usize::try_from(model_id).ok();
                match slot.and_then(|index| models.get_mut(index)) {
                    Some(model) => model.translation = transform.translation,
                    None => log::debug!(
                        "[resolve_translations] shape node {} references missing model {}",
                        shape.id,
                        model_id
                    ),
                }
            }
        } else if graph.groups.contains_key(&transform.child_id) {
            log::debug!(
                "[resolve_translations] transform node {} targets group {}; groups are not traversed",
                transform.id,
                transform.child_id
            );
        } else {
            log::debug!(
                "[resolve_translations] transform node {} targets undefined node {}",
                transform.id,
                transform.child_id
            );
        }
    }
}
