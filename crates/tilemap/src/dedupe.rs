// STD Dependencies -----------------------------------------------------------
use std::collections::HashMap;


// Internal Dependencies ------------------------------------------------------
use crate::options::DedupeOptions;
use crate::tile::{Flip, Tile};


// Tile References ------------------------------------------------------------
/// Reference from one tile position of the image into the unique tile set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TileRecord {
    pub tile: usize,
    pub flip: Flip,
    pub palette: u8,
    pub bank: u8
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniqueTiles {
    /// Unique tiles in order of their first appearance.
    pub tiles: Vec<Tile>,
    /// One record per tile position in scan order.
    pub records: Vec<TileRecord>
}


// Canonical Keys -------------------------------------------------------------
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TileKey {
    pixels: Vec<u8>,
    palette: Option<u8>
}

/// Lookup key under which equivalent tiles collapse.
///
/// The key holds the smallest pixel pattern out of all flips that are
/// allowed, together with the flip that turns the key pattern back into
/// `tile`. The palette only takes part when palette variants must stay
/// separate.
pub fn canonical_key(tile: &Tile, dedupe: &DedupeOptions) -> (TileKey, Flip) {
    let palette = if dedupe.palettes {
        None

    } else {
        Some(tile.palette)
    };

    let (pixels, flip) = if dedupe.flips {
        Flip::ALL.iter().skip(1).fold((tile.pixels.clone(), Flip::NONE), |(best, best_flip), flip| {
            let pixels = tile.flipped(*flip).pixels;
            if pixels < best {
                (pixels, *flip)

            } else {
                (best, best_flip)
            }
        })

    } else {
        (tile.pixels.clone(), Flip::NONE)
    };

    (TileKey { pixels, palette }, flip)
}


// Tile Deduplicator ----------------------------------------------------------
pub fn dedupe(tiles: Vec<Tile>, dedupe: &DedupeOptions, bank: u8) -> UniqueTiles {
    let mut index_map: HashMap<TileKey, (usize, Flip)> = HashMap::new();
    let mut unique_tiles: Vec<Tile> = Vec::new();
    let mut records = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let palette = tile.palette;
        let (tile_id, flip) = if dedupe.pattern {
            let (key, flip) = canonical_key(&tile, dedupe);

            // Tile is already mapped
            if let Some((tile_id, stored_flip)) = index_map.get(&key) {
                (*tile_id, stored_flip.then(flip))

            // Insert tile
            } else {
                let tile_id = unique_tiles.len();
                index_map.insert(key, (tile_id, flip));
                unique_tiles.push(tile);
                (tile_id, Flip::NONE)
            }

        } else {
            unique_tiles.push(tile);
            (unique_tiles.len() - 1, Flip::NONE)
        };

        records.push(TileRecord {
            tile: tile_id,
            flip,
            palette,
            bank
        });
    }

    UniqueTiles {
        tiles: unique_tiles,
        records
    }
}
