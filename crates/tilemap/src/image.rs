// Internal Dependencies ------------------------------------------------------
use crate::color::Color;
use crate::error::TilemapError;


// Source Images --------------------------------------------------------------
pub const BPP_INDEXED: usize = 1;
pub const BPP_INDEXED_ALPHA: usize = 2;
pub const BPP_RGB: usize = 3;
pub const BPP_RGBA: usize = 4;

/// A fully decoded pixel buffer handed over by an image loader.
///
/// Indexed buffers (1 or 2 bytes per pixel) reference the embedded color
/// table, direct color buffers (3 or 4 bytes per pixel) carry RGB values.
/// Alpha is never taken into account when comparing colors.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub pixels: Vec<u8>,
    pub color_table: Option<Vec<Color>>
}

impl SourceImage {
    pub fn indexed(width: usize, height: usize, pixels: Vec<u8>, color_table: Vec<Color>) -> Self {
        Self {
            width,
            height,
            bytes_per_pixel: BPP_INDEXED,
            pixels,
            color_table: Some(color_table)
        }
    }

    pub fn rgba(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes_per_pixel: BPP_RGBA,
            pixels,
            color_table: None
        }
    }

    pub fn validate(&self) -> Result<(), TilemapError> {
        if self.width == 0 || self.height == 0 {
            return Err(TilemapError::InvalidImage("image dimensions cannot be zero".to_string()));
        }
        match self.bytes_per_pixel {
            BPP_INDEXED | BPP_INDEXED_ALPHA if self.color_table.is_none() => {
                return Err(TilemapError::InvalidImage("indexed image without a color table".to_string()));
            },
            BPP_INDEXED | BPP_INDEXED_ALPHA | BPP_RGB | BPP_RGBA => {},
            bpp => {
                return Err(TilemapError::InvalidImage(format!("unsupported bytes per pixel: {}", bpp)));
            }
        }
        let expected = self.width * self.height * self.bytes_per_pixel;
        if self.pixels.len() != expected {
            return Err(TilemapError::InvalidImage(format!(
                "pixel buffer length {} does not match {}x{} at {} byte(s) per pixel",
                self.pixels.len(), self.width, self.height, self.bytes_per_pixel
            )));
        }
        Ok(())
    }

    /// Color of the pixel at the given offset in scan order.
    pub fn color_at(&self, index: usize) -> Result<Color, TilemapError> {
        let offset = index * self.bytes_per_pixel;
        let data = &self.pixels[offset..offset + self.bytes_per_pixel];
        match (self.bytes_per_pixel, &self.color_table) {
            (BPP_INDEXED, Some(table)) | (BPP_INDEXED_ALPHA, Some(table)) => {
                table.get(data[0] as usize).copied().ok_or_else(|| {
                    TilemapError::InvalidImage(format!(
                        "pixel {}x{} references color {} outside of the color table",
                        index % self.width,
                        index / self.width,
                        data[0]
                    ))
                })
            },
            _ => Ok(Color::new(data[0], data[1], data[2]))
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}
