// STD Dependencies -----------------------------------------------------------
use std::fmt::Write;


// Internal Dependencies ------------------------------------------------------
use crate::options::ConversionOptions;
use crate::Conversion;
use super::pattern::tiles_to_bytes;
use super::{map_records, palette_block, palette_count};


// C Source Export ------------------------------------------------------------
const BYTES_PER_LINE: usize = 16;

pub fn source(conversion: &Conversion, options: &ConversionOptions) -> String {
    let name = sanitize_name(&options.var_name);
    let upper = name.to_ascii_uppercase();
    let tile_count = conversion.unique.tiles.len();

    let mut text = String::new();
    writeln!(text, "// {}", name).ok();
    writeln!(
        text,
        "// {} unique tile(s) of {}, {}x{} map, {} palette(s)\n",
        tile_count,
        options.tile_size,
        conversion.map_width,
        conversion.map_height,
        palette_count(&conversion.palettes)
    ).ok();

    if options.bank != 0 {
        writeln!(text, "#pragma bank {}\n", options.bank).ok();
    }

    define(&mut text, &upper, "TILE_COUNT", tile_count);
    define(&mut text, &upper, "TILE_ORIGIN", options.tile_origin as usize);
    define(&mut text, &upper, "TILE_WIDTH", options.tile_size.width());
    define(&mut text, &upper, "TILE_HEIGHT", options.tile_size.height());
    define(&mut text, &upper, "MAP_WIDTH", conversion.map_width);
    define(&mut text, &upper, "MAP_HEIGHT", conversion.map_height);
    define(&mut text, &upper, "PALETTE_COUNT", palette_count(&conversion.palettes));
    text.push('\n');

    byte_array(&mut text, &format!("{}_tiles", name), &tiles_to_bytes(&conversion.unique.tiles));

    let palettes = palette_block(&conversion.palettes, &conversion.colors);
    if !palettes.is_empty() {
        byte_array(&mut text, &format!("{}_palettes", name), &palettes);
    }

    byte_array(&mut text, &format!("{}_map", name), &map_records(&conversion.unique.records, options.tile_origin));
    text
}

/// Turns an arbitrary name into a valid C identifier.
pub fn sanitize_name(name: &str) -> String {
    let mut ident: String = name.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn define(text: &mut String, prefix: &str, name: &str, value: usize) {
    writeln!(text, "#define {}_{} {}", prefix, name, value).ok();
}

fn byte_array(text: &mut String, name: &str, bytes: &[u8]) {
    writeln!(text, "const unsigned char {}[] = {{", name).ok();
    for line in bytes.chunks(BYTES_PER_LINE) {
        let line: Vec<String> = line.iter().map(|b| format!("0x{:02x}", b)).collect();
        writeln!(text, "    {},", line.join(",")).ok();
    }
    writeln!(text, "}};\n").ok();
}
