//! Error handling for the VOX importer
//!
//! Two fatal classes cover stream problems. [`FormatError`] rejects a
//! stream before chunk iteration begins: wrong magic, wrong version, or a
//! malformed root chunk. [`ParseError`] covers everything that goes wrong
//! while consuming chunk content: truncation, leftover bytes, bad counts,
//! bad strings. Both abort the whole import; there is no partial-file
//! recovery.
//!
//! Semantic conditions inside a well-formed stream (dangling scene graph
//! references, out-of-range material ids, unknown dictionary keys) are
//! tolerated at the decode sites with a debug log and never surface here.

use std::io;

pub type VoxResult<T> = Result<T, VoxError>;

/// Stream-level rejection, raised before any chunk content is interpreted.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("not a VOX stream: expected magic \"VOX \", found {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported VOX version {found} (expected {expected})")]
    UnsupportedVersion { found: i32, expected: i32 },

    #[error("expected root MAIN chunk, found {found:?}")]
    BadRootChunk { found: String },

    #[error("root MAIN chunk carries {size} content bytes (expected 0)")]
    RootContentNotEmpty { size: usize },
}

/// Chunk-level decode failure. The `chunk` field names the chunk whose
/// content buffer was being consumed, or "stream" for top-level reads.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{chunk}: needed {needed} bytes, {remaining} remain")]
    Truncated {
        chunk: String,
        needed: usize,
        remaining: usize,
    },

    #[error("{chunk}: {count} unconsumed bytes after decode")]
    TrailingBytes { chunk: String, count: usize },

    #[error("{chunk}: negative {field} ({value})")]
    NegativeCount {
        chunk: String,
        field: &'static str,
        value: i32,
    },

    #[error("{chunk}: {field} is not valid UTF-8")]
    InvalidString {
        chunk: String,
        field: &'static str,
    },

    #[error("material key {key:?}: value {value:?} is not a number")]
    InvalidFloat { key: String, value: String },

    #[error("SIZE declares {axis} extent {value} (valid range 1..=256)")]
    InvalidExtent { axis: char, value: i32 },

    #[error("voxel ({x}, {y}, {z}) lies outside the declared {size_x}x{size_y}x{size_z} grid")]
    VoxelOutOfBounds {
        x: u8,
        y: u8,
        z: u8,
        size_x: i32,
        size_y: i32,
        size_z: i32,
    },

    #[error("XYZI chunk with no preceding SIZE chunk")]
    OrphanVoxelData,
}

/// Unified error type returned by the public import entry points.
#[derive(Debug, thiserror::Error)]
pub enum VoxError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid import option {field}: {reason}")]
    InvalidOptions { field: &'static str, reason: String },
}
