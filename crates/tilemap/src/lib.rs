// STD Dependencies -----------------------------------------------------------
use std::path::Path;


// External Dependencies ------------------------------------------------------
use file_io::{FileWriter, Logger};


// Modules --------------------------------------------------------------------
pub mod assign;
pub mod color;
pub mod dedupe;
pub mod encoder;
pub mod error;
pub mod image;
pub mod options;
pub mod palette;
pub mod slicer;
pub mod tile;
#[cfg(test)] mod mocks;


// Re-Exports -----------------------------------------------------------------
pub use self::color::{parse_palette, Color, ColorTable};
pub use self::dedupe::{TileRecord, UniqueTiles};
pub use self::error::{Axis, Diagnostics, TilemapError};
pub use self::image::SourceImage;
pub use self::options::{ColorMode, ConversionOptions, DedupeOptions, OutputFormat, TileSize};
pub use self::palette::{Palette, PaletteSet};
pub use self::tile::{Flip, Tile};


// Conversion Result ----------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Conversion {
    pub colors: ColorTable,
    pub palettes: PaletteSet,
    pub unique: UniqueTiles,
    /// Map dimensions in tiles.
    pub map_width: usize,
    pub map_height: usize,
    pub diagnostics: Diagnostics
}


// Tile Converter -------------------------------------------------------------
pub struct Converter<'a> {
    options: &'a ConversionOptions
}

impl<'a> Converter<'a> {

    pub fn new(options: &'a ConversionOptions) -> Self {
        Self {
            options
        }
    }

    /// Runs the image through all conversion stages.
    ///
    /// `remap` replaces the automatically built color table with the given
    /// colors in the given order.
    pub fn convert(
        &self,
        logger: &mut Logger,
        image: &SourceImage,
        remap: Option<&[Color]>

    ) -> Result<Conversion, TilemapError> {

        let options = self.options;
        let tolerant = options.ignore_palette_errors;
        let mut diagnostics = Diagnostics::default();

        // Colors
        let (colors, indexed) = palette::build_color_table(image, remap, tolerant, &mut diagnostics)?;
        let used = indexed.used_colors(&colors);
        let mode = ColorMode::select(options.mode, used.len());
        logger.verbose(format!("{} color(s) used, converting in {} mode", used.len(), mode));
        palette::check_capacity(mode, &used, &colors, tolerant, &mut diagnostics)?;

        // Tiles
        let raw_tiles = slicer::slice(&indexed, options.tile_size)?;
        logger.verbose(format!("Sliced image into {} tile(s) of {}", raw_tiles.len(), options.tile_size));

        // Palettes
        let (palettes, ids) = match mode {
            ColorMode::Dmg => (palette::dmg_palette(&used, &colors), vec![0; raw_tiles.len()]),
            ColorMode::Cgb => assign::assign_palettes(
                &raw_tiles,
                &colors,
                PaletteSet::new(ColorMode::Cgb),
                tolerant,
                &mut diagnostics
            )?
        };
        logger.verbose(format!("Assigned tiles to {} palette(s)", palettes.len()));
        let tiles = assign::resolve_tiles(&raw_tiles, &ids, &palettes, &colors, options.tile_size);

        // De-duplication
        let unique = dedupe::dedupe(tiles, &options.effective_dedupe(), options.bank);
        logger.verbose(format!("Reduced {} tile(s) to {} unique tile(s)", unique.records.len(), unique.tiles.len()));

        Ok(Conversion {
            colors,
            palettes,
            unique,
            map_width: image.width / options.tile_size.width(),
            map_height: image.height / options.tile_size.height(),
            diagnostics
        })
    }

    pub fn encode(&self, conversion: &Conversion) -> Result<Vec<u8>, TilemapError> {
        encoder::encode(conversion, self.options)
    }

    /// Encodes the conversion and writes it out in one go, nothing is
    /// written when encoding fails.
    pub fn save<W: FileWriter>(
        &self,
        writer: &mut W,
        path: &Path,
        conversion: &Conversion

    ) -> Result<usize, TilemapError> {
        let bytes = self.encode(conversion)?;
        let len = bytes.len();
        writer.write_binary_file(path, bytes)?;
        Ok(len)
    }

}
