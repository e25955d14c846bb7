// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::collections::HashMap;


// Internal Dependencies ------------------------------------------------------
use crate::error::TilemapError;


// Colors ---------------------------------------------------------------------
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?
        })
    }

    /// 15-bit BGR value as used by the GameBoy Color palette registers.
    pub fn to_bgr555(&self) -> u16 {
        (self.b as u16 >> 3) << 10 | (self.g as u16 >> 3) << 5 | (self.r as u16 >> 3)
    }

    pub fn distance(&self, other: &Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Position of the closest color, the earliest one wins on ties.
    pub fn nearest<'a, I: IntoIterator<Item = &'a Color>>(&self, colors: I) -> Option<usize> {
        colors.into_iter()
            .enumerate()
            .min_by_key(|(i, c)| (self.distance(c), *i))
            .map(|(i, _)| i)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub fn format_colors(colors: &[Color]) -> String {
    colors.iter().map(|c| c.to_string()).collect::<Vec<String>>().join(", ")
}


// Color Table ----------------------------------------------------------------
/// Ordered set of all colors used by a conversion, the position of a color
/// is its index everywhere else in the pipeline.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ColorTable {
    colors: Vec<Color>,
    lookup: HashMap<Color, usize>
}

impl ColorTable {
    pub fn from_colors(colors: Vec<Color>) -> Self {
        let mut lookup = HashMap::new();
        for (index, color) in colors.iter().enumerate() {
            lookup.entry(*color).or_insert(index);
        }
        Self {
            colors,
            lookup
        }
    }

    pub fn index_of(&self, color: &Color) -> Option<usize> {
        self.lookup.get(color).copied()
    }

    pub fn get(&self, index: usize) -> Color {
        self.colors[index]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub(crate) fn insert(&mut self, color: Color) -> usize {
        if let Some(index) = self.index_of(&color) {
            index

        } else {
            let index = self.colors.len();
            self.colors.push(color);
            self.lookup.insert(color, index);
            index
        }
    }
}


// Remap Palette Files --------------------------------------------------------
pub fn parse_palette(text: &str) -> Result<Vec<Color>, TilemapError> {
    let mut colors = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }
        match Color::from_hex(line) {
            Some(color) => colors.push(color),
            // Comment
            None if line.starts_with('#') => continue,
            None => return Err(TilemapError::InvalidPaletteFile {
                line: index + 1,
                text: line.to_string()
            })
        }
    }
    Ok(colors)
}
