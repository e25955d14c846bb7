// Tiles ----------------------------------------------------------------------
/// Palette resolved tile, every pixel holds a palette slot from 0 to 3.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
    pub palette: u8
}

impl Tile {
    pub fn flipped(&self, flip: Flip) -> Tile {
        let (w, h) = (self.width, self.height);
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in 0..h {
            let sy = if flip.vertical { h - 1 - y } else { y };
            for x in 0..w {
                let sx = if flip.horizontal { w - 1 - x } else { x };
                pixels.push(self.pixels[sy * w + sx]);
            }
        }
        Tile {
            width: w,
            height: h,
            pixels,
            palette: self.palette
        }
    }
}


// Flips ----------------------------------------------------------------------
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool
}

impl Flip {
    pub const NONE: Flip = Flip { horizontal: false, vertical: false };
    pub const HORIZONTAL: Flip = Flip { horizontal: true, vertical: false };
    pub const VERTICAL: Flip = Flip { horizontal: false, vertical: true };
    pub const BOTH: Flip = Flip { horizontal: true, vertical: true };

    /// Candidate order when matching tiles, the first match wins.
    pub const ALL: [Flip; 4] = [Flip::NONE, Flip::HORIZONTAL, Flip::VERTICAL, Flip::BOTH];

    /// Applying `self` and then `other`, each flip undoes itself.
    pub fn then(self, other: Flip) -> Flip {
        Flip {
            horizontal: self.horizontal ^ other.horizontal,
            vertical: self.vertical ^ other.vertical
        }
    }
}
