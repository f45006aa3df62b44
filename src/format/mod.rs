//! Binary container plumbing
//!
//! The chunk cursor and the embedded dictionary codec. Everything above
//! this module works with decoded values; everything below is raw bytes.

mod cursor;
mod dict;

pub use cursor::{tag_label, ChunkCursor, RawChunk};
pub use dict::{read_dict, VoxDict};
