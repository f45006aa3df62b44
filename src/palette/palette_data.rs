//! Palette and Material Data - Pure DOP
//!
//! Color and material table structures. No methods.
//! All decoding and lookups happen in palette_operations.rs

use serde::{Deserialize, Serialize};

/// One palette color, channels normalized to [0.0, 1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// The 256-slot color table.
///
/// Slot 0 is reserved: voxel records never address it, and it stays a zero
/// placeholder so color indices can be used as direct offsets. `colors`
/// always holds exactly [`crate::constants::palette::COLOR_COUNT`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteData {
    pub colors: Vec<Rgba>,
}

/// Surface properties for one color index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProps {
    pub roughness: f32,
    pub metallic: f32,
    pub transmission: f32,
    pub emission: f32,
}

impl Default for MaterialProps {
    fn default() -> Self {
        Self {
            roughness: 0.5,
            metallic: 0.0,
            transmission: 0.0,
            emission: 0.0,
        }
    }
}

/// One material record per addressable color index 1..=255, stored at
/// offset `index - 1`. `entries` always holds exactly
/// [`crate::constants::palette::MATERIAL_COUNT`] records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTable {
    pub entries: Vec<MaterialProps>,
}
