//! Color palette and material tables
//!
//! RGBA palette decoding with the editor's stock palette as the fallback,
//! plus the MATL material dictionary walk. Data and operations are split
//! following DOP principles.

mod default_palette;
mod palette_data;
mod palette_operations;

pub use default_palette::DEFAULT_PALETTE_BYTES;
pub use palette_data::{MaterialProps, MaterialTable, PaletteData, Rgba};
pub use palette_operations::{
    apply_gamma, create_material_table, create_palette, decode_matl_chunk, decode_rgba_chunk,
    material_props, palette_color, rgba_from_bytes,
};
