// Internal Dependencies ------------------------------------------------------
use crate::options::{ColorMode, ConversionOptions};
use crate::Conversion;
use super::pattern::tiles_to_bytes;
use super::{map_records, palette_block, palette_count};


// Binary Container -----------------------------------------------------------
// Own container layout, not readable as a GBTD/GBMB object file despite
// sharing its file extensions.
pub const MAGIC_TILESET: &[u8; 4] = b"GBTS";
pub const MAGIC_TILESET_MAP: &[u8; 4] = b"GBTM";
pub const FORMAT_VERSION: u8 = 1;

fn header(magic: &[u8; 4], conversion: &Conversion, options: &ConversionOptions) -> Vec<u8> {
    let count = conversion.unique.tiles.len();
    let mut bytes = Vec::with_capacity(12);
    bytes.extend_from_slice(magic);
    bytes.push(FORMAT_VERSION);
    bytes.push(options.tile_size.width() as u8);
    bytes.push(options.tile_size.height() as u8);
    bytes.push(options.bank);
    bytes.push(count as u8);
    bytes.push((count >> 8) as u8);
    bytes.push(palette_count(&conversion.palettes) as u8);
    bytes.push(match conversion.palettes.mode {
        ColorMode::Dmg => 0,
        ColorMode::Cgb => 1
    });
    bytes
}

/// Header, tile patterns and palettes.
pub fn tileset(conversion: &Conversion, options: &ConversionOptions) -> Vec<u8> {
    let mut bytes = header(MAGIC_TILESET, conversion, options);
    bytes.append(&mut tiles_to_bytes(&conversion.unique.tiles));
    bytes.append(&mut palette_block(&conversion.palettes, &conversion.colors));
    bytes
}

/// Header, tile patterns, palettes and the map records.
pub fn tileset_map(conversion: &Conversion, options: &ConversionOptions) -> Vec<u8> {
    let mut bytes = header(MAGIC_TILESET_MAP, conversion, options);
    bytes.append(&mut tiles_to_bytes(&conversion.unique.tiles));
    bytes.append(&mut palette_block(&conversion.palettes, &conversion.colors));
    bytes.push(conversion.map_width as u8);
    bytes.push((conversion.map_width >> 8) as u8);
    bytes.push(conversion.map_height as u8);
    bytes.push((conversion.map_height >> 8) as u8);
    bytes.append(&mut map_records(&conversion.unique.records, options.tile_origin));
    bytes
}
