// STD Dependencies -----------------------------------------------------------
use std::path::Path;


// External Dependencies ------------------------------------------------------
use tilemap::{SourceImage, TilemapError};


// Image Loading --------------------------------------------------------------
/// Decodes any supported image file into an RGBA source image.
pub fn load_image(path: &Path) -> Result<SourceImage, TilemapError> {
    let img = image::open(path).map_err(|err| {
        TilemapError::InvalidImage(format!("Failed to load image file \"{}\": {}", path.display(), err))
    })?;

    let buffer = img.to_rgba8();
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let source = SourceImage::rgba(w, h, buffer.into_raw());
    source.validate()?;
    Ok(source)
}
