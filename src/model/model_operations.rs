//! Voxel Model Operations - Pure DOP Functions
//!
//! SIZE and XYZI chunk decoding plus grid lookups. All functions take data
//! and return results; the only state is the model being built.

use glam::IVec3;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::constants::grid::MAX_EXTENT;
use crate::error::{ParseError, VoxResult};
use crate::format::ChunkCursor;
use crate::model::model_data::{Voxel, VoxelModel};

/// Packs a lattice position into the scalar occupancy key. Each axis gets
/// one base-256 digit, which is why extents are capped at 256.
#[inline]
pub fn pack_key(x: i32, y: i32, z: i32) -> i32 {
    x + y * 256 + z * 256 * 256
}

/// Decodes a SIZE chunk into the next model's declared extent.
pub fn decode_size_chunk(cursor: &mut ChunkCursor<'_>) -> VoxResult<IVec3> {
    let x = cursor.read_i32()?;
    let y = cursor.read_i32()?;
    let z = cursor.read_i32()?;
    for (axis, value) in [('x', x), ('y', y), ('z', z)] {
        if !(1..=MAX_EXTENT).contains(&value) {
            return Err(ParseError::InvalidExtent { axis, value }.into());
        }
    }
    Ok(IVec3::new(x, y, z))
}

/// Decodes an XYZI chunk into a voxel model with the given stream id and
/// declared size.
///
/// Records with color index 0 are dropped with a debug log; records whose
/// position falls outside the declared grid fail the parse. When two
/// records share a position the later one replaces the earlier in place,
/// keeping the first record's traversal slot.
pub fn decode_xyzi_chunk(
    cursor: &mut ChunkCursor<'_>,
    id: u32,
    size: IVec3,
) -> VoxResult<VoxelModel> {
    let count = cursor.read_len("voxel count")?;
    let mut model = VoxelModel {
        id,
        size,
        voxels: Vec::with_capacity(count.min(cursor.remaining() / 4)),
        occupancy: FxHashMap::default(),
        colors_used: Vec::new(),
        translation: IVec3::ZERO,
    };
    let mut color_seen = [false; 256];

    for _ in 0..count {
        let record = cursor.read_bytes(4)?;
        let (x, y, z, color) = (record[0], record[1], record[2], record[3]);
        if color == 0 {
            log::debug!(
                "[decode_xyzi_chunk] model {id}: dropping voxel ({x}, {y}, {z}) with empty color index"
            );
            continue;
        }
        if x as i32 >= size.x || y as i32 >= size.y || z as i32 >= size.z {
            return Err(ParseError::VoxelOutOfBounds {
                x,
                y,
                z,
                size_x: size.x,
                size_y: size.y,
                size_z: size.z,
            }
            .into());
        }
        insert_voxel(&mut model, Voxel { x, y, z, color });
        if !color_seen[color as usize] {
            color_seen[color as usize] = true;
            model.colors_used.push(color);
        }
    }

    log::debug!(
        "[decode_xyzi_chunk] model {id}: {} voxels, {} colors in {}x{}x{} grid",
        model.voxels.len(),
        model.colors_used.len(),
        size.x,
        size.y,
        size.z
    );
    Ok(model)
}

/// Stores one voxel, keeping the record list and the occupancy index in
/// lockstep: a new position appends, a repeated position overwrites its
/// existing record in place.
pub fn insert_voxel(model: &mut VoxelModel, voxel: Voxel) {
    let key = pack_key(voxel.x as i32, voxel.y as i32, voxel.z as i32);
    match model.occupancy.entry(key) {
        Entry::Occupied(slot) => {
            model.voxels[*slot.get()] = voxel;
        }
        Entry::Vacant(slot) => {
            slot.insert(model.voxels.len());
            model.voxels.push(voxel);
        }
    }
}

/// Color index at a lattice position, or 0 when the cell is empty.
///
/// Positions outside [0, 256) on any axis answer 0 without touching the
/// occupancy map; the packed key would alias a valid cell otherwise.
pub fn voxel_at(model: &VoxelModel, pos: IVec3) -> u8 {
    if pos.x < 0
        || pos.x >= MAX_EXTENT
        || pos.y < 0
        || pos.y >= MAX_EXTENT
        || pos.z < 0
        || pos.z >= MAX_EXTENT
    {
        return 0;
    }
    match model.occupancy.get(&pack_key(pos.x, pos.y, pos.z)) {
        Some(&slot) => model.voxels[slot].color,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VoxError;

    fn encode_xyzi(records: &[(u8, u8, u8, u8)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(records.len() as i32).to_le_bytes());
        for (x, y, z, color) in records {
            bytes.extend_from_slice(&[*x, *y, *z, *color]);
        }
        bytes
    }

    fn decode(records: &[(u8, u8, u8, u8)], size: IVec3) -> VoxelModel {
        let bytes = encode_xyzi(records);
        let mut cursor = ChunkCursor::new(&bytes, "XYZI");
        let model = decode_xyzi_chunk(&mut cursor, 0, size).expect("Failed to decode XYZI");
        cursor.finish().expect("XYZI content not fully consumed");
        model
    }

    #[test]
    fn test_decode_size_chunk() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3i32.to_le_bytes());
        bytes.extend_from_slice(&256i32.to_le_bytes());
        bytes.extend_from_slice(&1i32.to_le_bytes());
        let mut cursor = ChunkCursor::new(&bytes, "SIZE");
        assert_eq!(
            decode_size_chunk(&mut cursor).expect("Failed to decode SIZE"),
            IVec3::new(3, 256, 1)
        );
    }

    #[test]
    fn test_decode_size_chunk_rejects_bad_extents() {
        for (value, axis) in [(0i32, 'x'), (257, 'y'), (-5, 'z')] {
            let mut bytes = Vec::new();
            for current in ['x', 'y', 'z'] {
                let extent = if current == axis { value } else { 8 };
                bytes.extend_from_slice(&extent.to_le_bytes());
            }
            let mut cursor = ChunkCursor::new(&bytes, "SIZE");
            match decode_size_chunk(&mut cursor) {
                Err(VoxError::Parse(ParseError::InvalidExtent {
                    axis: bad_axis,
                    value: bad_value,
                })) => {
                    assert_eq!(bad_axis, axis);
                    assert_eq!(bad_value, value);
                }
                other => panic!("Expected invalid extent error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_xyzi_keeps_record_order() {
        let model = decode(
            &[(2, 0, 0, 5), (0, 0, 0, 3), (1, 0, 0, 5)],
            IVec3::new(3, 1, 1),
        );
        assert_eq!(model.voxels.len(), 3);
        assert_eq!(model.voxels[0].x, 2);
        assert_eq!(model.voxels[1].x, 0);
        assert_eq!(model.colors_used, vec![5, 3]);
    }

    #[test]
    fn test_decode_xyzi_drops_empty_color_records() {
        let model = decode(&[(0, 0, 0, 0), (1, 0, 0, 7)], IVec3::new(2, 1, 1));
        assert_eq!(model.voxels.len(), 1);
        assert_eq!(model.voxels[0].color, 7);
        assert_eq!(model.colors_used, vec![7]);
    }

    #[test]
    fn test_decode_xyzi_rejects_out_of_bounds_position() {
        let bytes = encode_xyzi(&[(8, 0, 0, 1)]);
        let mut cursor = ChunkCursor::new(&bytes, "XYZI");
        assert!(matches!(
            decode_xyzi_chunk(&mut cursor, 0, IVec3::new(8, 8, 8)),
            Err(VoxError::Parse(ParseError::VoxelOutOfBounds { x: 8, .. }))
        ));
    }

    #[test]
    fn test_decode_xyzi_duplicate_position_overwrites_in_place() {
        let model = decode(
            &[(0, 0, 0, 1), (1, 0, 0, 2), (0, 0, 0, 9)],
            IVec3::new(2, 1, 1),
        );
        assert_eq!(model.voxels.len(), 2);
        // The later record wins but keeps the first record's slot
        assert_eq!(model.voxels[0].color, 9);
        assert_eq!(model.voxels[1].color, 2);
        assert_eq!(voxel_at(&model, IVec3::new(0, 0, 0)), 9);
    }

    #[test]
    fn test_voxel_at_lookup() {
        let model = decode(&[(1, 2, 3, 42)], IVec3::new(8, 8, 8));
        assert_eq!(voxel_at(&model, IVec3::new(1, 2, 3)), 42);
        assert_eq!(voxel_at(&model, IVec3::new(0, 0, 0)), 0);
    }

    #[test]
    fn test_voxel_at_out_of_range_never_aliases() {
        let model = decode(&[(0, 0, 0, 42)], IVec3::new(8, 8, 8));
        // pack_key(-256, 1, 0) would collide with the origin cell
        assert_eq!(pack_key(-256, 1, 0), pack_key(0, 0, 0));
        assert_eq!(voxel_at(&model, IVec3::new(-256, 1, 0)), 0);
        assert_eq!(voxel_at(&model, IVec3::new(256, 0, 0)), 0);
        assert_eq!(voxel_at(&model, IVec3::new(0, -1, 0)), 0);
    }
}
