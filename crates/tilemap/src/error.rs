// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::error::Error;


// External Dependencies ------------------------------------------------------
use file_io::FileError;


// Internal Dependencies ------------------------------------------------------
use crate::color::{format_colors, Color};
use crate::options::ColorMode;


// Conversion Errors ----------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
    Width,
    Height
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height")
        }
    }
}

#[derive(Debug)]
pub enum TilemapError {
    DimensionMismatch {
        axis: Axis,
        size: usize,
        tile: usize
    },
    InvalidImage(String),
    InvalidPaletteFile {
        line: usize,
        text: String
    },
    PaletteCapacityExceeded {
        mode: ColorMode,
        count: usize,
        capacity: usize
    },
    PaletteRemapMiss {
        colors: Vec<Color>
    },
    PaletteOverflow {
        tile: usize,
        x: usize,
        y: usize,
        colors: Vec<Color>
    },
    TileIdOverflow {
        count: usize,
        origin: u16,
        max: usize
    },
    OutputWrite(FileError)
}

impl fmt::Display for TilemapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TilemapError::DimensionMismatch { axis, size, tile } => write!(
                f,
                "Invalid image dimensions, image {} of {} pixel(s) is not a multiple of the tile {} of {}.",
                axis, size, axis, tile
            ),
            TilemapError::InvalidImage(message) => write!(f, "Invalid source image: {}", message),
            TilemapError::InvalidPaletteFile { line, text } => write!(
                f,
                "Invalid remap palette entry \"{}\" on line {}, expected a 24-bit hex value e.g. FF0080",
                text, line
            ),
            TilemapError::PaletteCapacityExceeded { mode, count, capacity } => write!(
                f,
                "Image contains {} colors which exceeds the limit of {} for {} mode",
                count, capacity, mode
            ),
            TilemapError::PaletteRemapMiss { colors } => write!(
                f,
                "Image color(s) {} not found in remap palette",
                format_colors(colors)
            ),
            TilemapError::PaletteOverflow { tile, x, y, colors } => write!(
                f,
                "Colors {} of tile #{} at {}x{} cannot fit into any of the available palettes",
                format_colors(colors), tile, x, y
            ),
            TilemapError::TileIdOverflow { count, origin, max } => write!(
                f,
                "{} unique tile(s) starting at tile id {} exceed the maximum tile id of {}",
                count, origin, max
            ),
            TilemapError::OutputWrite(err) => write!(f, "Failed to write output: {}", err)
        }
    }
}

impl Error for TilemapError {}

impl From<FileError> for TilemapError {
    fn from(err: FileError) -> Self {
        TilemapError::OutputWrite(err)
    }
}


// Tolerated Problems ---------------------------------------------------------
/// Problems which were substituted away because palette errors are ignored.
///
/// Stages only record into this, the caller reports the collected result
/// once the conversion is done.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Diagnostics {
    pub remapped_colors: Vec<(Color, Color)>,
    pub dropped_colors: Vec<Color>,
    pub overflowed_tiles: Vec<(usize, usize)>,
    pub overflowed_colors: Vec<Color>
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.remapped_colors.is_empty()
            && self.dropped_colors.is_empty()
            && self.overflowed_tiles.is_empty()
    }

    pub(crate) fn overflow(&mut self, tile: usize, palette: usize, colors: &[Color]) {
        self.overflowed_tiles.push((tile, palette));
        for color in colors {
            if !self.overflowed_colors.contains(color) {
                self.overflowed_colors.push(*color);
            }
        }
    }

    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if !self.remapped_colors.is_empty() {
            messages.push(format!(
                "Color(s) missing from remap palette were substituted: {}",
                self.remapped_colors.iter().map(|(from, to)| {
                    format!("{} -> {}", from, to)

                }).collect::<Vec<String>>().join(", ")
            ));
        }
        if !self.dropped_colors.is_empty() {
            messages.push(format!(
                "Color(s) beyond the palette capacity were dropped: {}",
                format_colors(&self.dropped_colors)
            ));
        }
        if !self.overflowed_tiles.is_empty() {
            messages.push(format!(
                "{} tile(s) did not fit any palette and were forced onto one ({}), out of range color(s): {}",
                self.overflowed_tiles.len(),
                self.overflowed_tiles.iter().map(|(tile, palette)| {
                    format!("tile #{} -> palette {}", tile, palette)

                }).collect::<Vec<String>>().join(", "),
                format_colors(&self.overflowed_colors)
            ));
        }
        messages
    }
}
