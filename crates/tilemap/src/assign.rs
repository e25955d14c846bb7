// Internal Dependencies ------------------------------------------------------
use crate::color::{Color, ColorTable};
use crate::error::{Diagnostics, TilemapError};
use crate::options::{TileSize, COLORS_PER_PALETTE};
use crate::palette::{Palette, PaletteSet};
use crate::slicer::RawTile;
use crate::tile::Tile;


// Palette Assigner -----------------------------------------------------------
/// Partitions the tile colors of the image into GameBoy Color palettes.
///
/// Tiles are visited in scan order and each one takes the first palette
/// that already contains all of its colors, otherwise the first palette
/// that has enough free slots to take the missing ones, otherwise a new
/// palette. Colors are never moved once placed, so the result depends on
/// tile order.
///
/// A tile which fits nowhere is an error. When palette errors are ignored
/// it is forced onto the highest palette instead and its out of range
/// colors are recorded.
pub fn assign_palettes(
    tiles: &[RawTile],
    table: &ColorTable,
    mut palettes: PaletteSet,
    tolerant: bool,
    diagnostics: &mut Diagnostics

) -> Result<(PaletteSet, Vec<usize>), TilemapError> {
    let mut ids = Vec::with_capacity(tiles.len());
    for (index, tile) in tiles.iter().enumerate() {
        let colors = tile.colors();

        // Existing palette already has all colors
        let id = if let Some(id) = palettes.palettes.iter().position(|p| p.covers(&colors)) {
            id

        // Existing palette can be extended
        } else if let Some(id) = palettes.palettes.iter().position(|p| p.merged_len(&colors) <= COLORS_PER_PALETTE) {
            palettes.palettes[id].extend(&colors);
            id

        // Open up a new palette
        } else if !palettes.is_full() && colors.len() <= COLORS_PER_PALETTE {
            palettes.palettes.push(Palette::new(colors.clone()));
            palettes.len() - 1

        } else if tolerant {
            if !palettes.is_full() {
                palettes.palettes.push(Palette::new(colors.iter().take(COLORS_PER_PALETTE).copied().collect()));
            }
            let id = palettes.len() - 1;
            let missing: Vec<Color> = colors.iter()
                .filter(|c| palettes.get(id).slot_of(**c).is_none())
                .map(|c| table.get(*c))
                .collect();

            diagnostics.overflow(index, id, &missing);
            id

        } else {
            return Err(TilemapError::PaletteOverflow {
                tile: index,
                x: tile.x,
                y: tile.y,
                colors: colors.iter().map(|c| table.get(*c)).collect()
            });
        };
        ids.push(id);
    }
    Ok((palettes, ids))
}

/// Replaces the color indices of every tile with the slots of its palette.
pub fn resolve_tiles(
    tiles: &[RawTile],
    ids: &[usize],
    palettes: &PaletteSet,
    table: &ColorTable,
    size: TileSize

) -> Vec<Tile> {
    tiles.iter().zip(ids.iter()).map(|(tile, id)| {
        let palette = palettes.get(*id);
        Tile {
            width: size.width(),
            height: size.height(),
            pixels: tile.pixels.iter().map(|c| palette.resolve(*c, table) as u8).collect(),
            palette: *id as u8
        }

    }).collect()
}


#[cfg(test)]
mod test {

    use super::{assign_palettes, resolve_tiles};
    use crate::color::{Color, ColorTable};
    use crate::error::{Diagnostics, TilemapError};
    use crate::options::{ColorMode, TileSize};
    use crate::palette::{dmg_palette, Palette, PaletteSet};
    use crate::slicer::RawTile;

    fn raw(colors: &[usize]) -> RawTile {
        RawTile {
            x: 0,
            y: 0,
            pixels: (0..64).map(|i| colors[i % colors.len()]).collect()
        }
    }

    fn table(count: usize) -> ColorTable {
        ColorTable::from_colors((0..count).map(|i| Color::new(i as u8 * 7, 0, 0)).collect())
    }

    fn assign(tiles: &[RawTile], count: usize, tolerant: bool) -> Result<(PaletteSet, Vec<usize>, Diagnostics), TilemapError> {
        let mut diagnostics = Diagnostics::default();
        let (palettes, ids) = assign_palettes(tiles, &table(count), PaletteSet::new(ColorMode::Cgb), tolerant, &mut diagnostics)?;
        Ok((palettes, ids, diagnostics))
    }

    #[test]
    fn test_assign_greedy_first_fit() {
        let tiles = vec![
            raw(&[0, 1]),
            raw(&[2, 3]),
            raw(&[4, 5, 6]),
            raw(&[1, 0]),
            raw(&[4, 7]),
            raw(&[0, 8])
        ];
        let (palettes, ids, diagnostics) = assign(&tiles, 9, false).unwrap();
        assert_eq!(palettes.palettes, vec![
            Palette::new(vec![0, 1, 2, 3]),
            Palette::new(vec![4, 5, 6, 7]),
            Palette::new(vec![0, 8])
        ]);
        assert_eq!(ids, vec![0, 0, 1, 0, 1, 2]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_assign_covering_palette_preferred() {
        // The last tile could extend palette 0 but palette 1 already covers it
        let tiles = vec![
            raw(&[0, 5]),
            raw(&[1, 2, 3, 4]),
            raw(&[2, 3])
        ];
        let (palettes, ids, _) = assign(&tiles, 6, false).unwrap();
        assert_eq!(palettes.palettes[0], Palette::new(vec![0, 5]));
        assert_eq!(ids, vec![0, 1, 1]);
    }

    #[test]
    fn test_assign_validity() {
        let tiles: Vec<RawTile> = (0..16).map(|i| raw(&[i % 8, (i * 3) % 8, 8 + i % 4])).collect();
        let (palettes, ids, _) = assign(&tiles, 12, false).unwrap();
        assert!(palettes.len() <= 8);
        for (tile, id) in tiles.iter().zip(ids.iter()) {
            assert!(palettes.get(*id).covers(&tile.colors()));
            assert!(palettes.get(*id).colors().len() <= 4);
        }
    }

    #[test]
    fn test_assign_overflow() {
        let tiles = vec![raw(&[0, 1, 2, 3, 4])];
        match assign(&tiles, 5, false) {
            Err(TilemapError::PaletteOverflow { tile, colors, .. }) => {
                assert_eq!(tile, 0);
                assert_eq!(colors.len(), 5);
            },
            other => panic!("Unexpected result: {:?}", other)
        }

        let (palettes, ids, diagnostics) = assign(&tiles, 5, true).unwrap();
        assert_eq!(palettes.palettes, vec![Palette::new(vec![0, 1, 2, 3])]);
        assert_eq!(ids, vec![0]);
        assert_eq!(diagnostics.overflowed_tiles, vec![(0, 0)]);
        assert_eq!(diagnostics.overflowed_colors, vec![Color::new(28, 0, 0)]);
    }

    #[test]
    fn test_assign_overflow_all_banks_used() {
        // Eight disjoint palettes of four colors use up all banks
        let mut tiles: Vec<RawTile> = (0..8).map(|p| raw(&[p * 4, p * 4 + 1, p * 4 + 2, p * 4 + 3])).collect();
        tiles.push(raw(&[0, 4]));
        assert!(assign(&tiles, 32, false).is_err());

        let (palettes, ids, diagnostics) = assign(&tiles, 32, true).unwrap();
        assert_eq!(palettes.len(), 8);
        assert_eq!(ids[8], 7);
        assert_eq!(diagnostics.overflowed_tiles, vec![(8, 7)]);
        assert_eq!(diagnostics.overflowed_colors.len(), 2);
    }

    #[test]
    fn test_resolve_tiles() {
        let table = table(4);
        let tiles = vec![raw(&[3, 1]), raw(&[1, 2])];
        let palettes = dmg_palette(&[1, 2, 3], &table);
        let tiles = resolve_tiles(&tiles, &[0, 0], &palettes, &table, TileSize::Square8);
        assert_eq!(&tiles[0].pixels[0..4], &[3, 1, 3, 1]);
        assert_eq!(&tiles[1].pixels[0..4], &[1, 2, 1, 2]);
        assert_eq!(tiles[0].palette, 0);
    }
}
