// STD Dependencies -----------------------------------------------------------
use std::collections::HashMap;


// Internal Dependencies ------------------------------------------------------
use crate::color::{Color, ColorTable};
use crate::error::{Diagnostics, TilemapError};
use crate::image::SourceImage;
use crate::options::{ColorMode, COLORS_PER_PALETTE};


// Palettes -------------------------------------------------------------------
/// Up to four color table indices, the position of an entry is the 2-bit
/// value stored in the tile patterns.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Palette {
    colors: Vec<usize>
}

impl Palette {
    pub fn new(colors: Vec<usize>) -> Self {
        Self {
            colors
        }
    }

    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    pub fn slot_of(&self, color: usize) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    pub fn covers(&self, colors: &[usize]) -> bool {
        colors.iter().all(|c| self.colors.contains(c))
    }

    /// Number of colors the palette would hold after adding `colors`.
    pub fn merged_len(&self, colors: &[usize]) -> usize {
        self.colors.len() + colors.iter().filter(|c| !self.colors.contains(c)).count()
    }

    pub fn extend(&mut self, colors: &[usize]) {
        for color in colors {
            if !self.colors.contains(color) {
                self.colors.push(*color);
            }
        }
    }

    /// Slot for `color`, falling back to the closest palette entry when the
    /// color is not part of this palette.
    pub fn resolve(&self, color: usize, table: &ColorTable) -> usize {
        self.slot_of(color).unwrap_or_else(|| {
            let target = table.get(color);
            let entries: Vec<Color> = self.colors.iter().map(|c| table.get(*c)).collect();
            target.nearest(&entries).unwrap_or(0)
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PaletteSet {
    pub mode: ColorMode,
    pub palettes: Vec<Palette>
}

impl PaletteSet {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            palettes: Vec::new()
        }
    }

    pub fn get(&self, id: usize) -> &Palette {
        &self.palettes[id]
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.palettes.len() >= self.mode.max_palettes()
    }
}


// Color Analysis -------------------------------------------------------------
/// Source image reduced to color table indices.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IndexedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<usize>
}

impl IndexedImage {
    /// Distinct color indices in ascending order.
    pub fn used_colors(&self, table: &ColorTable) -> Vec<usize> {
        let mut used = vec![false; table.len()];
        for p in &self.pixels {
            used[*p] = true;
        }
        used.into_iter().enumerate().filter(|(_, u)| *u).map(|(i, _)| i).collect()
    }
}

/// Builds the color table for the image and maps every pixel into it.
///
/// Without a remap palette colors are numbered in order of their first
/// appearance. With one, the remap palette defines the numbering and every
/// missing color is an error unless `tolerant` is set, in which case the
/// closest remap color is used instead.
pub fn build_color_table(
    image: &SourceImage,
    remap: Option<&[Color]>,
    tolerant: bool,
    diagnostics: &mut Diagnostics

) -> Result<(ColorTable, IndexedImage), TilemapError> {

    image.validate()?;

    let mut pixels = Vec::with_capacity(image.pixel_count());
    let table = if let Some(remap) = remap {
        let table = ColorTable::from_colors(remap.to_vec());
        let mut misses: HashMap<Color, usize> = HashMap::new();
        let mut missing: Vec<Color> = Vec::new();
        for i in 0..image.pixel_count() {
            let color = image.color_at(i)?;
            let index = if let Some(index) = table.index_of(&color) {
                index

            } else if let Some(index) = misses.get(&color) {
                *index

            } else {
                missing.push(color);
                let index = color.nearest(table.colors()).unwrap_or(0);
                misses.insert(color, index);
                index
            };
            pixels.push(index);
        }

        if !missing.is_empty() {
            if !tolerant || table.is_empty() {
                return Err(TilemapError::PaletteRemapMiss {
                    colors: missing
                });
            }
            for color in missing {
                diagnostics.remapped_colors.push((color, table.get(misses[&color])));
            }
        }
        table

    } else {
        let mut table = ColorTable::default();
        for i in 0..image.pixel_count() {
            let color = image.color_at(i)?;
            pixels.push(table.insert(color));
        }
        table
    };

    Ok((table, IndexedImage {
        width: image.width,
        height: image.height,
        pixels
    }))
}

/// Verifies that the number of used colors fits the hardware mode.
///
/// In tolerant DMG mode the colors beyond the single palette are recorded
/// as dropped and get substituted once tiles are resolved. CGB losses are
/// only known after palette assignment and get reported from there.
pub fn check_capacity(
    mode: ColorMode,
    used: &[usize],
    table: &ColorTable,
    tolerant: bool,
    diagnostics: &mut Diagnostics

) -> Result<(), TilemapError> {
    let capacity = mode.capacity();
    if used.len() > capacity {
        if !tolerant {
            return Err(TilemapError::PaletteCapacityExceeded {
                mode,
                count: used.len(),
                capacity
            });
        }
        if mode == ColorMode::Dmg {
            diagnostics.dropped_colors.extend(used.iter().skip(capacity).map(|c| table.get(*c)));
        }
    }
    Ok(())
}

/// Single palette for the 4 shade mode.
///
/// When all used colors are among the first four table entries those
/// entries are kept in table order, so a remap palette keeps its slots.
pub fn dmg_palette(used: &[usize], table: &ColorTable) -> PaletteSet {
    let colors = if used.iter().all(|c| *c < COLORS_PER_PALETTE) {
        (0..table.len().min(COLORS_PER_PALETTE)).collect()

    } else {
        used.iter().take(COLORS_PER_PALETTE).copied().collect()
    };
    PaletteSet {
        mode: ColorMode::Dmg,
        palettes: vec![Palette::new(colors)]
    }
}


#[cfg(test)]
mod test {

    use super::{build_color_table, check_capacity, dmg_palette, Palette};
    use crate::color::{Color, ColorTable};
    use crate::error::{Diagnostics, TilemapError};
    use crate::mocks::{image_from_rows, GREYS};
    use crate::options::ColorMode;

    #[test]
    fn test_first_occurrence_order() {
        let image = image_from_rows(&["3102", "2013"], &GREYS);
        let mut diagnostics = Diagnostics::default();
        let (table, indexed) = build_color_table(&image, None, false, &mut diagnostics).unwrap();
        assert_eq!(table.colors(), &[GREYS[3], GREYS[1], GREYS[0], GREYS[2]]);
        assert_eq!(indexed.pixels, vec![0, 1, 2, 3, 3, 2, 1, 0]);
        assert_eq!(indexed.used_colors(&table), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_remap_palette_order() {
        let image = image_from_rows(&["31", "20"], &GREYS);
        let mut diagnostics = Diagnostics::default();
        let (table, indexed) = build_color_table(&image, Some(&GREYS), false, &mut diagnostics).unwrap();
        assert_eq!(table.colors(), &GREYS);
        assert_eq!(indexed.pixels, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_remap_palette_miss() {
        let colors = [GREYS[0], GREYS[1], Color::new(255, 0, 0), Color::new(0, 0, 250)];
        let image = image_from_rows(&["0123", "3210"], &colors);
        let remap = [GREYS[0], GREYS[1], Color::new(240, 0, 0)];

        let mut diagnostics = Diagnostics::default();
        match build_color_table(&image, Some(&remap), false, &mut diagnostics) {
            Err(TilemapError::PaletteRemapMiss { colors: missing }) => {
                assert_eq!(missing, vec![colors[2], colors[3]]);
            },
            other => panic!("Unexpected result: {:?}", other)
        }

        let (_, indexed) = build_color_table(&image, Some(&remap), true, &mut diagnostics).unwrap();
        assert_eq!(indexed.pixels, vec![0, 1, 2, 1, 1, 2, 1, 0]);
        assert_eq!(diagnostics.remapped_colors, vec![
            (colors[2], remap[2]),
            (colors[3], remap[1])
        ]);
    }

    #[test]
    fn test_capacity_boundary() {
        let table = ColorTable::from_colors(GREYS.to_vec());
        let mut diagnostics = Diagnostics::default();
        assert!(check_capacity(ColorMode::Dmg, &[0, 1, 2, 3], &table, false, &mut diagnostics).is_ok());

        let mut colors = GREYS.to_vec();
        colors.push(Color::new(255, 0, 0));
        let table = ColorTable::from_colors(colors);
        match check_capacity(ColorMode::Dmg, &[0, 1, 2, 3, 4], &table, false, &mut diagnostics) {
            Err(TilemapError::PaletteCapacityExceeded { count, capacity, .. }) => {
                assert_eq!(count, 5);
                assert_eq!(capacity, 4);
            },
            other => panic!("Unexpected result: {:?}", other)
        }
        assert!(diagnostics.is_empty());

        check_capacity(ColorMode::Dmg, &[0, 1, 2, 3, 4], &table, true, &mut diagnostics).unwrap();
        assert_eq!(diagnostics.dropped_colors, vec![Color::new(255, 0, 0)]);
    }

    #[test]
    fn test_capacity_tolerant_cgb() {
        let table = ColorTable::from_colors((0..33).map(|i| Color::new(i as u8, 0, 0)).collect());
        let used: Vec<usize> = (0..33).collect();
        let mut diagnostics = Diagnostics::default();
        assert!(check_capacity(ColorMode::Cgb, &used, &table, false, &mut diagnostics).is_err());

        // Left for the palette assigner to decide
        check_capacity(ColorMode::Cgb, &used, &table, true, &mut diagnostics).unwrap();
        assert!(diagnostics.dropped_colors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_dmg_palette() {
        let table = ColorTable::from_colors(GREYS.to_vec());
        assert_eq!(dmg_palette(&[0, 3], &table).palettes, vec![Palette::new(vec![0, 1, 2, 3])]);

        let mut colors = GREYS.to_vec();
        colors.push(Color::new(255, 0, 0));
        let table = ColorTable::from_colors(colors);
        assert_eq!(dmg_palette(&[1, 2, 4], &table).palettes, vec![Palette::new(vec![1, 2, 4])]);
    }

    #[test]
    fn test_palette_resolve() {
        let table = ColorTable::from_colors(vec![
            Color::new(0, 0, 0),
            Color::new(255, 255, 255),
            Color::new(250, 250, 250)
        ]);
        let palette = Palette::new(vec![0, 1]);
        assert_eq!(palette.resolve(1, &table), 1);
        assert_eq!(palette.resolve(2, &table), 1);
        assert!(palette.covers(&[0, 1]));
        assert!(!palette.covers(&[0, 2]));
        assert_eq!(palette.merged_len(&[1, 2]), 3);
    }
}
