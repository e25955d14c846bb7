// Internal Dependencies ------------------------------------------------------
use crate::error::{Axis, TilemapError};
use crate::options::TileSize;
use crate::palette::IndexedImage;


// Raw Tiles ------------------------------------------------------------------
/// Color table indices of one tile position, before palettes are applied.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawTile {
    pub x: usize,
    pub y: usize,
    pub pixels: Vec<usize>
}

impl RawTile {
    /// Distinct colors of the tile in ascending order.
    pub fn colors(&self) -> Vec<usize> {
        let mut colors = self.pixels.clone();
        colors.sort_unstable();
        colors.dedup();
        colors
    }
}


// Tile Slicer ----------------------------------------------------------------
/// Splits the image into tiles, left to right and top to bottom.
pub fn slice(image: &IndexedImage, size: TileSize) -> Result<Vec<RawTile>, TilemapError> {
    let (tw, th) = (size.width(), size.height());
    let (w, h) = (image.width, image.height);
    if w % tw != 0 {
        return Err(TilemapError::DimensionMismatch {
            axis: Axis::Width,
            size: w,
            tile: tw
        });

    } else if h % th != 0 {
        return Err(TilemapError::DimensionMismatch {
            axis: Axis::Height,
            size: h,
            tile: th
        });
    }

    let mut tiles = Vec::with_capacity(w / tw * h / th);
    for ty in 0..h / th {
        for tx in 0..w / tw {
            let ox = tx * tw;
            let oy = ty * th;
            let mut pixels = Vec::with_capacity(tw * th);
            for y in 0..th {
                let row = (oy + y) * w + ox;
                pixels.extend_from_slice(&image.pixels[row..row + tw]);
            }
            tiles.push(RawTile {
                x: tx,
                y: ty,
                pixels
            });
        }
    }
    Ok(tiles)
}
