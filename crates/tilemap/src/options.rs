// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::convert::TryFrom;


// External Dependencies ------------------------------------------------------
use serde::Deserialize;


// Hardware Color Modes -------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Original GameBoy, a single palette of 4 shades.
    Dmg,
    /// GameBoy Color, up to 8 palettes of 4 colors each.
    Cgb
}

impl ColorMode {
    pub fn max_palettes(&self) -> usize {
        match self {
            ColorMode::Dmg => 1,
            ColorMode::Cgb => 8
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_palettes() * COLORS_PER_PALETTE
    }

    /// Picks the mode for a given number of distinct colors unless one was
    /// requested explicitly.
    pub fn select(requested: Option<ColorMode>, color_count: usize) -> ColorMode {
        match requested {
            Some(mode) => mode,
            None if color_count <= COLORS_PER_PALETTE => ColorMode::Dmg,
            None => ColorMode::Cgb
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorMode::Dmg => write!(f, "DMG (4 colors)"),
            ColorMode::Cgb => write!(f, "CGB (32 colors)")
        }
    }
}

pub const COLORS_PER_PALETTE: usize = 4;


// Tile Dimensions ------------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum TileSize {
    Square8,
    Tall8x16,
    Square16,
    Square32
}

impl TileSize {
    pub fn width(&self) -> usize {
        match self {
            TileSize::Square8 | TileSize::Tall8x16 => 8,
            TileSize::Square16 => 16,
            TileSize::Square32 => 32
        }
    }

    pub fn height(&self) -> usize {
        match self {
            TileSize::Square8 => 8,
            TileSize::Tall8x16 | TileSize::Square16 => 16,
            TileSize::Square32 => 32
        }
    }
}

impl Default for TileSize {
    fn default() -> Self {
        TileSize::Square8
    }
}

impl FromStr for TileSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8x8" => Ok(TileSize::Square8),
            "8x16" => Ok(TileSize::Tall8x16),
            "16x16" => Ok(TileSize::Square16),
            "32x32" => Ok(TileSize::Square32),
            _ => Err(format!("Invalid tile size \"{}\", expected one of 8x8, 8x16, 16x16 or 32x32", s))
        }
    }
}

impl TryFrom<String> for TileSize {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for TileSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}


// Output Formats -------------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OutputFormat {
    Tileset,
    TilesetMap,
    CSource
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tileset => "gbr",
            OutputFormat::TilesetMap => "gbm",
            OutputFormat::CSource => "c"
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gbr" => Ok(OutputFormat::Tileset),
            "gbm" => Ok(OutputFormat::TilesetMap),
            "csource" => Ok(OutputFormat::CSource),
            _ => Err(format!("Output mode \"{}\" missing or incorrect", s))
        }
    }
}


// Conversion Options ---------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DedupeOptions {
    /// Merge tiles with identical pixel patterns.
    pub pattern: bool,
    /// Also match horizontally, vertically and doubly flipped patterns.
    pub flips: bool,
    /// Merge identical patterns even when they use different palettes.
    pub palettes: bool
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            pattern: true,
            flips: true,
            palettes: true
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub format: OutputFormat,
    pub mode: Option<ColorMode>,
    pub tile_size: TileSize,
    pub dedupe: DedupeOptions,
    pub ignore_palette_errors: bool,
    pub bank: u8,
    pub tile_origin: u16,
    pub var_name: String,
    pub palette_file: Option<PathBuf>
}

impl ConversionOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            mode: None,
            tile_size: TileSize::default(),
            dedupe: DedupeOptions::default(),
            ignore_palette_errors: false,
            bank: 0,
            tile_origin: 0,
            var_name: "tiles".to_string(),
            palette_file: None
        }
    }

    /// Dedupe settings in effect for the output format.
    ///
    /// A plain tileset has no map to record flips or palettes in, so every
    /// tile position is kept as is.
    pub fn effective_dedupe(&self) -> DedupeOptions {
        match self.format {
            OutputFormat::Tileset => DedupeOptions {
                pattern: false,
                flips: false,
                palettes: false
            },
            OutputFormat::TilesetMap | OutputFormat::CSource => self.dedupe
        }
    }
}


#[cfg(test)]
mod test {

    use super::{ColorMode, ConversionOptions, DedupeOptions, OutputFormat, TileSize};

    #[test]
    fn test_mode_selection() {
        assert_eq!(ColorMode::select(None, 1), ColorMode::Dmg);
        assert_eq!(ColorMode::select(None, 4), ColorMode::Dmg);
        assert_eq!(ColorMode::select(None, 5), ColorMode::Cgb);
        assert_eq!(ColorMode::select(Some(ColorMode::Dmg), 12), ColorMode::Dmg);
        assert_eq!(ColorMode::select(Some(ColorMode::Cgb), 2), ColorMode::Cgb);
        assert_eq!(ColorMode::Dmg.capacity(), 4);
        assert_eq!(ColorMode::Cgb.capacity(), 32);
    }

    #[test]
    fn test_tile_size_parse() {
        assert_eq!("8x8".parse::<TileSize>(), Ok(TileSize::Square8));
        assert_eq!("8x16".parse::<TileSize>(), Ok(TileSize::Tall8x16));
        assert_eq!("16x16".parse::<TileSize>(), Ok(TileSize::Square16));
        assert_eq!("32x32".parse::<TileSize>(), Ok(TileSize::Square32));
        assert!("16x8".parse::<TileSize>().is_err());
        assert_eq!(TileSize::Tall8x16.to_string(), "8x16");
    }

    #[test]
    fn test_output_format() {
        assert_eq!("gbm".parse::<OutputFormat>(), Ok(OutputFormat::TilesetMap));
        assert_eq!(OutputFormat::CSource.extension(), "c");
        assert!("-gbx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_effective_dedupe() {
        let mut options = ConversionOptions::new(OutputFormat::TilesetMap);
        options.dedupe.palettes = false;
        assert_eq!(options.effective_dedupe(), DedupeOptions {
            pattern: true,
            flips: true,
            palettes: false
        });

        options.format = OutputFormat::CSource;
        assert_eq!(options.effective_dedupe(), options.dedupe);

        options.format = OutputFormat::Tileset;
        assert_eq!(options.effective_dedupe(), DedupeOptions {
            pattern: false,
            flips: false,
            palettes: false
        });
    }
}
