// Internal Dependencies ------------------------------------------------------
use crate::tile::Tile;


// 2bpp Pattern Data ----------------------------------------------------------
pub const HARDWARE_TILE_SIZE: usize = 8;
pub const HARDWARE_TILE_BYTES: usize = 16;

/// Encodes a tile into GameBoy 2bpp data.
///
/// Tiles larger than 8x8 are split into 8x8 hardware tiles from left to
/// right and top to bottom, each row stores the low bit plane followed by
/// the high bit plane with the leftmost pixel in bit 7.
pub fn tile_to_bytes(tile: &Tile) -> Vec<u8> {
    let (w, h) = (tile.width, tile.height);
    let mut bytes = Vec::with_capacity(w * h / 4);
    for ty in 0..h / HARDWARE_TILE_SIZE {
        for tx in 0..w / HARDWARE_TILE_SIZE {
            let ox = tx * HARDWARE_TILE_SIZE;
            let oy = ty * HARDWARE_TILE_SIZE;
            let mut data = [0; HARDWARE_TILE_BYTES];
            for y in 0..HARDWARE_TILE_SIZE {
                for x in 0..HARDWARE_TILE_SIZE {
                    let i = tile.pixels[(oy + y) * w + ox + x];
                    if i & 1 == 1 {
                        data[y * 2] |= 1 << (7 - x);
                    }
                    if i & 2 == 2 {
                        data[y * 2 + 1] |= 1 << (7 - x);
                    }
                }
            }
            bytes.extend_from_slice(&data);
        }
    }
    bytes
}

pub fn tiles_to_bytes(tiles: &[Tile]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for tile in tiles {
        bytes.append(&mut tile_to_bytes(tile));
    }
    bytes
}


#[cfg(test)]
mod test {

    use super::tile_to_bytes;
    use crate::tile::Tile;

    #[test]
    fn test_tile_to_bytes() {
        let mut pixels = vec![0; 64];
        // Row 0: 3 2 1 0 0 0 0 1
        pixels[0] = 3;
        pixels[1] = 2;
        pixels[2] = 1;
        pixels[7] = 1;
        // Row 7: all 2
        for x in 0..8 {
            pixels[56 + x] = 2;
        }
        let bytes = tile_to_bytes(&Tile {
            width: 8,
            height: 8,
            pixels,
            palette: 0
        });
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..2], &[0b1010_0001, 0b1100_0000]);
        assert_eq!(&bytes[2..14], &[0; 12]);
        assert_eq!(&bytes[14..16], &[0b0000_0000, 0b1111_1111]);
    }

    #[test]
    fn test_tall_tile_to_bytes() {
        // Top half slot 1, bottom half slot 3
        let pixels = (0..128).map(|i| if i < 64 { 1 } else { 3 }).collect();
        let bytes = tile_to_bytes(&Tile {
            width: 8,
            height: 16,
            pixels,
            palette: 0
        });
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..2], &[0xFF, 0x00]);
        assert_eq!(&bytes[16..18], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_large_tile_order() {
        // 16x16 tile with only the top right pixel set
        let mut pixels = vec![0; 256];
        pixels[15] = 1;
        let bytes = tile_to_bytes(&Tile {
            width: 16,
            height: 16,
            pixels,
            palette: 0
        });
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[16], 0b0000_0001);
    }
}
