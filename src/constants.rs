//! Shared constants for the VOX container format
//!
//! Every magic number the decoder compares against lives here, grouped by
//! concern. Chunk tags are byte arrays rather than strings so header reads
//! compare without allocation.

/// Container framing.
pub mod format {
    /// First four bytes of every VOX stream.
    pub const MAGIC: [u8; 4] = *b"VOX ";

    /// The single container version this importer accepts.
    pub const SUPPORTED_VERSION: i32 = 200;
}

/// Chunk tag identifiers.
pub mod tags {
    /// Root chunk wrapping the whole stream.
    pub const MAIN: [u8; 4] = *b"MAIN";

    /// Model grid extent.
    pub const SIZE: [u8; 4] = *b"SIZE";

    /// Model voxel records.
    pub const XYZI: [u8; 4] = *b"XYZI";

    /// Palette colors.
    pub const RGBA: [u8; 4] = *b"RGBA";

    /// Material properties.
    pub const MATL: [u8; 4] = *b"MATL";

    /// Scene graph transform node.
    pub const TRANSFORM: [u8; 4] = *b"nTRN";

    /// Scene graph group node.
    pub const GROUP: [u8; 4] = *b"nGRP";

    /// Scene graph shape node.
    pub const SHAPE: [u8; 4] = *b"nSHP";
}

/// Voxel grid limits.
pub mod grid {
    /// Maximum lattice extent per axis. The packed occupancy key assigns
    /// each axis one base-256 digit, so extents past this would alias.
    pub const MAX_EXTENT: i32 = 256;
}

/// Palette and material table sizing.
pub mod palette {
    /// Total palette slots, including the reserved index 0.
    pub const COLOR_COUNT: usize = 256;

    /// Material records, one per addressable color index 1..=255.
    pub const MATERIAL_COUNT: usize = 255;
}
