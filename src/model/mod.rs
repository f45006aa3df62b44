//! Sparse voxel models
//!
//! SIZE/XYZI decoding into record-ordered voxel lists with a packed-key
//! occupancy index for neighbor lookups.

mod model_data;
mod model_operations;

pub use model_data::{Voxel, VoxelModel};
pub use model_operations::{decode_size_chunk, decode_xyzi_chunk, insert_voxel, pack_key, voxel_at};
