// Modules --------------------------------------------------------------------
mod binary;
mod csource;
pub mod pattern;


// Internal Dependencies ------------------------------------------------------
use crate::dedupe::TileRecord;
use crate::error::TilemapError;
use crate::options::{ColorMode, ConversionOptions, OutputFormat};
use crate::palette::PaletteSet;
use crate::color::ColorTable;
use crate::Conversion;
pub use self::csource::sanitize_name;


// Constants ------------------------------------------------------------------
/// Largest tile id a map record can hold.
pub const MAX_MAP_TILE_ID: usize = 0xFF;

/// Largest tile count the tileset header can hold.
pub const MAX_TILESET_COUNT: usize = 0xFFFF;

const ATTR_VERTICAL_FLIP: u8 = 0b0100_0000;
const ATTR_HORIZONTAL_FLIP: u8 = 0b0010_0000;
const ATTR_PALETTE_MASK: u8 = 0b0000_0111;


// Encoder --------------------------------------------------------------------
pub fn encode(conversion: &Conversion, options: &ConversionOptions) -> Result<Vec<u8>, TilemapError> {
    let count = conversion.unique.tiles.len();
    match options.format {
        OutputFormat::Tileset => {
            if count > MAX_TILESET_COUNT {
                return Err(TilemapError::TileIdOverflow {
                    count,
                    origin: 0,
                    max: MAX_TILESET_COUNT
                });
            }
            Ok(binary::tileset(conversion, options))
        },
        OutputFormat::TilesetMap => {
            check_tile_ids(count, options.tile_origin)?;
            Ok(binary::tileset_map(conversion, options))
        },
        OutputFormat::CSource => {
            check_tile_ids(count, options.tile_origin)?;
            Ok(csource::source(conversion, options).into_bytes())
        }
    }
}

fn check_tile_ids(count: usize, origin: u16) -> Result<(), TilemapError> {
    if count + origin as usize > MAX_MAP_TILE_ID + 1 {
        Err(TilemapError::TileIdOverflow {
            count,
            origin,
            max: MAX_MAP_TILE_ID
        })

    } else {
        Ok(())
    }
}


// Shared Blocks --------------------------------------------------------------
/// Number of palettes written out, DMG output carries none.
fn palette_count(palettes: &PaletteSet) -> usize {
    match palettes.mode {
        ColorMode::Dmg => 0,
        ColorMode::Cgb => palettes.len()
    }
}

/// Three bytes per map position: tile id, attributes and bank.
fn map_records(records: &[TileRecord], origin: u16) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(records.len() * 3);
    for record in records {
        // V-Flip    H-Flip    Palette#
        let mut attributes = record.palette & ATTR_PALETTE_MASK;
        if record.flip.vertical {
            attributes |= ATTR_VERTICAL_FLIP;
        }
        if record.flip.horizontal {
            attributes |= ATTR_HORIZONTAL_FLIP;
        }
        bytes.push((record.tile + origin as usize) as u8);
        bytes.push(attributes);
        bytes.push(record.bank);
    }
    bytes
}

/// Four little endian BGR555 words per palette, unused slots are zero.
fn palette_block(palettes: &PaletteSet, colors: &ColorTable) -> Vec<u8> {
    let mut bytes = Vec::new();
    if palettes.mode == ColorMode::Dmg {
        return bytes;
    }
    for palette in &palettes.palettes {
        for slot in 0..4 {
            let word = palette.colors().get(slot).map(|c| colors.get(*c).to_bgr555()).unwrap_or(0);
            bytes.push(word as u8);
            bytes.push((word >> 8) as u8);
        }
    }
    bytes
}
