//! Palette and Material Operations - Pure DOP Functions
//!
//! All functions are pure: take data, return results, no side effects
//! beyond the table passed in. RGBA decoding, the default palette, gamma
//! correction, and the gated MATL dictionary walk all live here.

use crate::constants::palette::MATERIAL_COUNT;
use crate::error::{ParseError, VoxResult};
use crate::format::{read_dict, ChunkCursor, VoxDict};
use crate::palette::default_palette::DEFAULT_PALETTE_BYTES;
use crate::palette::palette_data::{MaterialProps, MaterialTable, PaletteData, Rgba};

/// Normalizes one 8-bit color record.
pub fn rgba_from_bytes(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    Rgba {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: a as f32 / 255.0,
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Creates the color table preloaded with the editor's stock palette, used
/// whenever a stream carries no RGBA chunk. Slot 0 stays zeroed.
pub fn create_palette() -> PaletteData {
    let mut colors = vec![Rgba::default(); crate::constants::palette::COLOR_COUNT];
    for (entry, record) in DEFAULT_PALETTE_BYTES.chunks(4).take(MATERIAL_COUNT).enumerate() {
        colors[entry + 1] = rgba_from_bytes(record[0], record[1], record[2], record[3]);
    }
    PaletteData { colors }
}

/// Color for a voxel color index.
pub fn palette_color(palette: &PaletteData, index: u8) -> Rgba {
    palette.colors[index as usize]
}

/// Decodes an RGBA chunk over `palette` in place: 255 color records for
/// indices 1..=255, then one reserved record that is consumed and dropped.
pub fn decode_rgba_chunk(
    cursor: &mut ChunkCursor<'_>,
    palette: &mut PaletteData,
) -> VoxResult<()> {
    for index in 1..=MATERIAL_COUNT {
        let record = cursor.read_bytes(4)?;
        palette.colors[index] = rgba_from_bytes(record[0], record[1], record[2], record[3]);
    }
    // Reserved 256th record
    cursor.read_bytes(4)?;
    Ok(())
}

/// Raises RGB channels to the `gamma` exponent in place. Alpha stays
/// linear, matching how hosts interpret the channel.
pub fn apply_gamma(palette: &mut PaletteData, gamma: f32) {
    for color in &mut palette.colors {
        color.r = color.r.powf(gamma);
        color.g = color.g.powf(gamma);
        color.b = color.b.powf(gamma);
    }
}

// ============================================================================
// Materials
// ============================================================================

/// Recognized MATL dictionary keys. Everything else is ignored so newer
/// editor versions keep importing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaterialKey {
    Type,
    Roughness,
    Metallic,
    Alpha,
    Emission,
    Flux,
    Unknown,
}

impl MaterialKey {
    fn from_name(name: &str) -> Self {
        match name {
            "_type" => Self::Type,
            "_rough" => Self::Roughness,
            "_metal" => Self::Metallic,
            "_alpha" => Self::Alpha,
            "_emit" => Self::Emission,
            "_flux" => Self::Flux,
            _ => Self::Unknown,
        }
    }
}

/// Creates the material table with every record at its defaults.
pub fn create_material_table() -> MaterialTable {
    MaterialTable {
        entries: vec![MaterialProps::default(); MATERIAL_COUNT],
    }
}

/// Material record for a voxel color index. Index 0 is never written by
/// MATL decoding, so it answers with the defaults.
pub fn material_props(materials: &MaterialTable, index: u8) -> MaterialProps {
    if index == 0 {
        return MaterialProps::default();
    }
    materials.entries[index as usize - 1]
}

/// Decodes a MATL chunk: an int32 material id, then a property dictionary
/// applied in encounter order to the record for color index `id`.
///
/// Ids outside 1..=255 have no color slot. The dictionary is still fully
/// consumed so the content length checks out, then the record is dropped.
pub fn decode_matl_chunk(
    cursor: &mut ChunkCursor<'_>,
    materials: &mut MaterialTable,
) -> VoxResult<()> {
    let id = cursor.read_i32()?;
    let dict = read_dict(cursor)?;
    if !(1..=MATERIAL_COUNT as i32).contains(&id) {
        log::debug!("[decode_matl_chunk] skipping material id {id} with no color slot");
        return Ok(());
    }
    apply_material_dict(&mut materials.entries[id as usize - 1], &dict)
}

/// Walks dictionary pairs in encounter order.
///
/// `_type` updates the gate tag for every later pair; `_metal`, `_alpha`
/// and `_emit` only land when the gate matches their type, while `_rough`
/// and `_flux` apply unconditionally. `_flux` scales whatever emission has
/// accumulated so far, so pair order is observable in the output.
fn apply_material_dict(props: &mut MaterialProps, dict: &VoxDict) -> VoxResult<()> {
    let mut type_tag = "";
    for (key, value) in dict.iter() {
        match MaterialKey::from_name(key) {
            MaterialKey::Type => type_tag = value,
            MaterialKey::Roughness => props.roughness = parse_material_float(key, value)?,
            MaterialKey::Metallic if type_tag == "_metal" => {
                props.metallic = parse_material_float(key, value)?;
            }
            MaterialKey::Alpha if type_tag == "_glass" => {
                props.transmission = parse_material_float(key, value)?;
            }
            MaterialKey::Emission if type_tag == "_emit" => {
                props.emission = parse_material_float(key, value)?;
            }
            MaterialKey::Flux => {
                props.emission *= parse_material_float(key, value)? + 1.0;
            }
            MaterialKey::Unknown => {}
            // Gated keys whose gate is closed: the value is not even parsed
            _ => {}
        }
    }
    Ok(())
}

fn parse_material_float(key: &str, value: &str) -> VoxResult<f32> {
    match value.parse::<f32>() {
        Ok(number) => Ok(number),
        Err(_) => Err(ParseError::InvalidFloat {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into()),
    }
}
