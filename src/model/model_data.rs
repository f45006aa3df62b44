//! Voxel Model Data - Pure DOP
//!
//! Sparse voxel grid structures. No methods.
//! All decoding and lookups happen in model_operations.rs

use glam::IVec3;
use rustc_hash::FxHashMap;

/// One stored voxel: lattice position plus palette color index.
///
/// The color index is never 0; empty-colored records are dropped during
/// decoding so absence stays unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub color: u8,
}

/// Sparse color-indexed voxel grid for a single model.
///
/// `voxels` keeps stream record order so every later traversal is
/// deterministic; `occupancy` maps the packed grid key of each position to
/// its slot in `voxels` for constant-time neighbor lookups.
#[derive(Debug, Clone)]
pub struct VoxelModel {
    /// Position of the defining SIZE/XYZI pair in the stream, counted from 0.
    pub id: u32,
    /// Declared grid extent per axis, each in 1..=256.
    pub size: IVec3,
    /// Stored voxels in record order.
    pub voxels: Vec<Voxel>,
    /// Packed position key to `voxels` slot.
    pub occupancy: FxHashMap<i32, usize>,
    /// Distinct color indices in first-seen order.
    pub colors_used: Vec<u8>,
    /// Lattice translation assigned by scene resolution; origin until then.
    pub translation: IVec3,
}
